//! Core types and traits for gateway storage proof generation
//!
//! This crate provides the chain-independent building blocks used to produce
//! Merkle-Patricia storage proofs for the message boxes of a cross-chain
//! gateway contract.
//!
//! # Contents
//!
//! - **Keys**: [`StorageSlotKey`] and [`HexBytes`], the `0x`-prefixed wire types
//! - **Layout**: [`MessageBoxLayout`], the configured storage offsets of the
//!   inbox and outbox
//! - **Proofs**: [`ProofResult`] and the raw `eth_getProof` response shapes
//! - **Traits**: [`LedgerClient`], the seam to the remote ledger node
//!
//! Chain-specific derivation and encoding live in `gateway-proof-ethereum`.

// Module declarations
pub mod error;
pub mod key;
pub mod layout;
pub mod proof;
pub mod traits;

// Re-export all public types and traits for convenience
pub use error::{BoxError, GatewayProofError};
pub use key::{normalize_quantity, strip_hex_prefix, to_quantity, HexBytes, StorageSlotKey};
pub use layout::{
    MappingFold, MessageBox, MessageBoxLayout, DEFAULT_INBOX_OFFSET, DEFAULT_OUTBOX_OFFSET,
};
pub use proof::{
    AccountRecord, BlockSummary, ProofResult, RawAccountProof, RawStorageProof, StorageProofEntry,
};
pub use traits::LedgerClient;
