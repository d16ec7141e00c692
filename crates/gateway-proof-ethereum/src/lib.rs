//! Ethereum storage proof generation for gateway message boxes
//!
//! This crate provides the Ethereum implementation of the proof pipeline:
//! Solidity slot key derivation, canonical RLP serialization of trie node
//! paths, `eth_getProof` retrieval over JSON-RPC, and the outbox/inbox
//! proof generator built on top of them.

mod generator;
mod proof;
mod resolver;
mod rpc;
mod serializer;

pub use generator::ProofGenerator;
pub use proof::{assemble_proof, EthereumProofFetcher};
pub use resolver::{derive_slot_key, EthereumSlotResolver};
pub use rpc::{JsonRpcClient, JsonRpcErrorObject};
pub use serializer::{
    decode_account_record, decode_serialized_proof, extract_account_value, serialize_proof,
    NodeItem,
};
