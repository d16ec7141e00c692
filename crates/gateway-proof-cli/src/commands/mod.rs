//! Command implementations for the gateway-proof CLI tool

pub mod proof;
pub mod slot;

pub use proof::cmd_message_box_proof;
pub use slot::{cmd_decode_account, cmd_slot_key};
