//! Command-line interface definitions for the gateway-proof tool
//!
//! This module contains the clap structures for argument parsing and command
//! definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use gateway_proof_core::MappingFold;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    #[value(name = "json")]
    Json,
    /// Indented JSON
    #[default]
    #[value(name = "pretty")]
    Pretty,
    /// TOML document
    #[value(name = "toml")]
    Toml,
}

/// Multi-key mapping fold
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum FoldArg {
    /// Hash all keys followed by the offset in one pass
    #[default]
    Concatenated,
    /// Hash one key at a time, feeding each result back in as the slot
    Nested,
}

impl From<FoldArg> for MappingFold {
    fn from(fold: FoldArg) -> Self {
        match fold {
            FoldArg::Concatenated => MappingFold::Concatenated,
            FoldArg::Nested => MappingFold::Nested,
        }
    }
}

#[derive(Parser)]
#[command(name = "gateway-proof")]
#[command(about = "Storage proof generator for gateway outboxes and inboxes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "pretty", value_enum)]
    pub format: OutputFormat,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a storage proof for the gateway outbox
    OutboxProof(ProofArgs),

    /// Generate a storage proof for the gateway inbox
    InboxProof(ProofArgs),

    /// Derive a storage slot key without contacting a node
    SlotKey {
        /// Storage offset of the mapping (hex)
        #[arg(long)]
        offset: String,

        /// Mapping key (hex), repeatable
        #[arg(long = "key")]
        keys: Vec<String>,

        /// How multiple keys are folded into the slot
        #[arg(long, default_value = "concatenated", value_enum)]
        fold: FoldArg,
    },

    /// Decode an encoded account value from a proof result
    DecodeAccount {
        /// RLP-encoded account value (hex)
        #[arg(long)]
        value: String,
    },
}

#[derive(Args, Clone, Debug)]
pub struct ProofArgs {
    /// Gateway contract address
    #[arg(long)]
    pub address: String,

    /// Mapping key into the message box (hex), repeatable
    #[arg(long = "key")]
    pub keys: Vec<String>,

    /// Block number (latest if not specified)
    #[arg(long)]
    pub block: Option<String>,

    /// Storage offset overriding the configured layout
    #[arg(long)]
    pub offset: Option<String>,

    /// RPC endpoint URL (falls back to GATEWAY_PROOF_RPC)
    #[arg(long)]
    pub rpc: Option<String>,

    /// Message box layout file (.toml or JSON)
    #[arg(short, long)]
    pub layout: Option<PathBuf>,
}
