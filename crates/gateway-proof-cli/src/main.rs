//! CLI tool for gateway message box storage proofs
//!
//! This binary provides the `gateway-proof` command-line interface for
//! generating outbox/inbox proofs, deriving slot keys and decoding account
//! values.

use anyhow::Result;
use clap::Parser;
use gateway_proof_core::MessageBox;

mod cli;
mod commands;
mod formatters;

use cli::{Cli, Commands};
use commands::{cmd_decode_account, cmd_message_box_proof, cmd_slot_key};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Err(e) = dotenv::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    let output = cli.output.as_deref();
    match cli.command {
        Commands::OutboxProof(args) => {
            cmd_message_box_proof(MessageBox::Outbox, &args, cli.format, output).await
        }
        Commands::InboxProof(args) => {
            cmd_message_box_proof(MessageBox::Inbox, &args, cli.format, output).await
        }
        Commands::SlotKey { offset, keys, fold } => {
            cmd_slot_key(&offset, &keys, fold.into(), cli.format, output)
        }
        Commands::DecodeAccount { value } => cmd_decode_account(&value, cli.format, output),
    }
}
