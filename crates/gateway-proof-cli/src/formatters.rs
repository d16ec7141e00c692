//! Output formatting and configuration loading
//!
//! This module renders results in the selected format, writes them to a file
//! or stdout, and loads message box layouts.

use std::path::Path;

use anyhow::{Context, Result};
use gateway_proof_core::MessageBoxLayout;
use serde::Serialize;

use crate::cli::OutputFormat;

/// Helper function to write output to file or stdout
pub fn write_output(content: &str, output_path: Option<&Path>) -> Result<()> {
    if let Some(path) = output_path {
        std::fs::write(path, content)?;
        println!("Output written to {}", path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

/// Render any serializable result in the requested format
pub fn format_value<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(value).map_err(Into::into),
        OutputFormat::Pretty => serde_json::to_string_pretty(value).map_err(Into::into),
        OutputFormat::Toml => toml::to_string_pretty(value).map_err(Into::into),
    }
}

/// Load and validate a message box layout
///
/// Files ending in `.toml` are parsed as TOML, anything else as JSON.
/// Missing fields take the gateway defaults.
pub fn load_layout(layout_path: &Path) -> Result<MessageBoxLayout> {
    let content = std::fs::read_to_string(layout_path)
        .with_context(|| format!("Failed to read layout {}", layout_path.display()))?;

    let is_toml = layout_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let layout: MessageBoxLayout = if is_toml {
        toml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };

    layout.validate()?;
    Ok(layout)
}
