//! Proof command implementation
//!
//! Generates outbox and inbox storage proofs against a live node.

use std::path::Path;

use anyhow::{anyhow, Result};
use gateway_proof_core::{MessageBox, MessageBoxLayout};
use gateway_proof_ethereum::{JsonRpcClient, ProofGenerator};
use tracing::{debug, info};

use crate::cli::{OutputFormat, ProofArgs};
use crate::formatters::{format_value, load_layout, write_output};

/// Environment variable consulted when `--rpc` is not given
pub const RPC_ENV_VAR: &str = "GATEWAY_PROOF_RPC";

/// Pick the RPC endpoint: the explicit flag wins over the environment
pub fn resolve_rpc_url(rpc: Option<&str>, from_env: Option<String>) -> Result<String> {
    rpc.map(str::to_string)
        .or(from_env)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| anyhow!("No RPC endpoint: pass --rpc or set {}", RPC_ENV_VAR))
}

/// Execute outbox-proof / inbox-proof commands
pub async fn cmd_message_box_proof(
    message_box: MessageBox,
    args: &ProofArgs,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let rpc = resolve_rpc_url(args.rpc.as_deref(), std::env::var(RPC_ENV_VAR).ok())?;
    let layout = match &args.layout {
        Some(path) => {
            debug!("Loading layout from {}", path.display());
            load_layout(path)?
        }
        None => MessageBoxLayout::default(),
    };

    info!(
        "Generating {} proof for {} via {}",
        message_box, args.address, rpc
    );

    let generator = ProofGenerator::with_layout(JsonRpcClient::new(&rpc)?, layout)?;
    let proof = generator
        .get_message_box_proof(
            message_box,
            &args.address,
            &args.keys,
            args.block.as_deref(),
            args.offset.as_deref(),
        )
        .await?;

    info!(
        "Proof generated at block {} ({} account node(s))",
        proof.block_number,
        proof.account_proof.len()
    );

    write_output(&format_value(&proof, format)?, output)
}
