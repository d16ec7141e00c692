//! Trait definitions for gateway-proof-core
//!
//! The ledger node is an external collaborator. [`LedgerClient`] is the seam
//! between proof construction and whatever transport reaches the node, so the
//! pipeline can run against a JSON-RPC endpoint or an in-memory fixture.

use crate::{BlockSummary, GatewayProofError, RawAccountProof, StorageSlotKey};

/// Access to a ledger node's block and proof endpoints
///
/// Each call is a one-shot request with exactly one outcome. Implementations
/// must report a node-side error as `Err` even if the response also carried
/// a (possibly partial) result.
///
/// # Examples
///
/// ```rust,ignore
/// use gateway_proof_core::LedgerClient;
///
/// struct MyClient;
///
/// impl LedgerClient for MyClient {
///     async fn block_by_tag(&self, tag: &str) -> Result<BlockSummary, GatewayProofError> {
///         // query the node
///         todo!()
///     }
///
///     async fn get_proof(
///         &self,
///         address: &str,
///         storage_keys: &[StorageSlotKey],
///         block: &str,
///     ) -> Result<RawAccountProof, GatewayProofError> {
///         todo!()
///     }
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait LedgerClient {
    /// Fetch the block identified by `tag` (`latest` or a hex number)
    async fn block_by_tag(&self, tag: &str) -> Result<BlockSummary, GatewayProofError>;

    /// Fetch the account and storage proofs of `address` at `block`
    ///
    /// # Errors
    ///
    /// - `GatewayProofError::ProofRetrieval` - transport or node failure
    async fn get_proof(
        &self,
        address: &str,
        storage_keys: &[StorageSlotKey],
        block: &str,
    ) -> Result<RawAccountProof, GatewayProofError>;
}
