//! Message box layout configuration
//!
//! The gateway contract keeps its outbox and inbox roots at fixed positions in
//! its storage layout. Those positions are configuration, not logic: they are
//! carried by [`MessageBoxLayout`], injected into the proof generator at
//! construction, and can be loaded from a deployment's config file.

use serde::{Deserialize, Serialize};

use crate::{strip_hex_prefix, GatewayProofError};

/// Declaration offset of the message outbox in the gateway contract
pub const DEFAULT_OUTBOX_OFFSET: &str = "9";

/// Declaration offset of the message inbox in the gateway contract
pub const DEFAULT_INBOX_OFFSET: &str = "a";

/// The two message queues whose roots can be proven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageBox {
    Outbox,
    Inbox,
}

impl core::fmt::Display for MessageBox {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MessageBox::Outbox => f.write_str("outbox"),
            MessageBox::Inbox => f.write_str("inbox"),
        }
    }
}

/// How a list of mapping keys is folded into one slot key
///
/// The two folds agree whenever at most one mapping key is supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingFold {
    /// `keccak256(pad(k1) ++ ... ++ pad(kn) ++ pad(offset))`, hashed once
    #[default]
    Concatenated,
    /// Solidity nested-mapping rule: each level hashes `pad(k) ++ previous slot`
    Nested,
}

/// Storage layout of the gateway's message boxes
///
/// # Example config (TOML)
///
/// ```toml
/// outbox_offset = "9"
/// inbox_offset = "a"
/// mapping_fold = "concatenated"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageBoxLayout {
    /// Hex offset of the outbox mapping
    pub outbox_offset: String,
    /// Hex offset of the inbox mapping
    pub inbox_offset: String,
    /// Mapping key fold used when deriving slot keys
    pub mapping_fold: MappingFold,
}

impl Default for MessageBoxLayout {
    fn default() -> Self {
        Self {
            outbox_offset: DEFAULT_OUTBOX_OFFSET.to_string(),
            inbox_offset: DEFAULT_INBOX_OFFSET.to_string(),
            mapping_fold: MappingFold::Concatenated,
        }
    }
}

impl MessageBoxLayout {
    /// Configured offset for a message box
    pub fn offset(&self, message_box: MessageBox) -> &str {
        match message_box {
            MessageBox::Outbox => &self.outbox_offset,
            MessageBox::Inbox => &self.inbox_offset,
        }
    }

    /// Validate the layout
    ///
    /// Offsets must be non-empty hex of at most 32 bytes, and the two boxes
    /// must not share a slot.
    pub fn validate(&self) -> Result<(), GatewayProofError> {
        for (name, offset) in [
            ("outbox_offset", &self.outbox_offset),
            ("inbox_offset", &self.inbox_offset),
        ] {
            let digits = strip_hex_prefix(offset);
            if digits.is_empty() {
                return Err(GatewayProofError::Config(format!("{} is empty", name)));
            }
            if digits.len() > 64 {
                return Err(GatewayProofError::Config(format!(
                    "{} '{}' is wider than 32 bytes",
                    name, offset
                )));
            }
            if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(GatewayProofError::Config(format!(
                    "{} '{}' is not hex",
                    name, offset
                )));
            }
        }

        if canonical_offset(&self.outbox_offset) == canonical_offset(&self.inbox_offset) {
            return Err(GatewayProofError::Config(format!(
                "outbox and inbox share offset {}",
                self.outbox_offset
            )));
        }

        Ok(())
    }
}

fn canonical_offset(offset: &str) -> String {
    let lower = strip_hex_prefix(offset).to_ascii_lowercase();
    let trimmed = lower.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
