//! Ethereum proof fetcher for retrieving storage proofs via RPC
//!
//! This module pins a request to one block, calls `eth_getProof` through a
//! [`LedgerClient`] and turns the raw node paths into a verifier-ready
//! [`ProofResult`]. A result is all-or-nothing: any failure aborts the whole
//! request.

use gateway_proof_core::{
    GatewayProofError, LedgerClient, ProofResult, RawAccountProof, StorageProofEntry,
    StorageSlotKey,
};
use tracing::{debug, info};

use crate::serializer::{extract_account_value, serialize_proof};

/// Ethereum proof fetcher using the `eth_getProof` RPC method
///
/// # Usage
///
/// ```rust,ignore
/// use gateway_proof_ethereum::{EthereumProofFetcher, JsonRpcClient};
///
/// let fetcher = EthereumProofFetcher::new(JsonRpcClient::new("http://localhost:8546")?);
/// let proof = fetcher.fetch_proof(address, &[slot_key], None).await?;
/// ```
#[derive(Debug, Clone)]
pub struct EthereumProofFetcher<C> {
    client: C,
}

impl<C: LedgerClient> EthereumProofFetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Resolve the block a proof is taken at
    ///
    /// An explicit block identifier is returned unmodified. When none is
    /// given (or it is empty), the node's `latest` block is queried once and
    /// its number returned as `0x`-prefixed hex.
    pub async fn resolve_block_number(
        &self,
        block_number: Option<&str>,
    ) -> Result<String, GatewayProofError> {
        match block_number {
            Some(block) if !block.is_empty() => Ok(block.to_string()),
            _ => {
                let block = self.client.block_by_tag("latest").await?;
                let number = block.number_hex()?;
                debug!(block = %number, "resolved latest block");
                Ok(number)
            }
        }
    }

    /// Fetch and serialize the proofs of `address` and its `slot_keys`
    ///
    /// # Arguments
    ///
    /// * `address` - Account to prove
    /// * `slot_keys` - Already-derived storage slot keys
    /// * `block_number` - Hex block number, or `None` for the current head
    ///
    /// # Errors
    ///
    /// - `GatewayProofError::ProofRetrieval` - RPC failed or returned the wrong
    ///   set of storage proofs
    /// - `GatewayProofError::Serialization` - a node failed to decode
    /// - `GatewayProofError::Decoding` - the account proof has no account leaf
    pub async fn fetch_proof(
        &self,
        address: &str,
        slot_keys: &[StorageSlotKey],
        block_number: Option<&str>,
    ) -> Result<ProofResult, GatewayProofError> {
        let block = self.resolve_block_number(block_number).await?;
        info!(
            "Fetching proof for {} with {} storage key(s) at block {}",
            address,
            slot_keys.len(),
            block
        );

        let raw = self.client.get_proof(address, slot_keys, &block).await?;
        assemble_proof(raw, slot_keys, block)
    }
}

/// Build a [`ProofResult`] from a raw `eth_getProof` response
///
/// Checks that the node answered exactly the requested keys, in order, then
/// serializes every node path and extracts the encoded account value.
pub fn assemble_proof(
    raw: RawAccountProof,
    requested: &[StorageSlotKey],
    block_number: String,
) -> Result<ProofResult, GatewayProofError> {
    if raw.storage_proof.len() != requested.len() {
        return Err(GatewayProofError::retrieval(
            "eth_getProof",
            format!(
                "node returned {} storage proof(s) for {} requested key(s)",
                raw.storage_proof.len(),
                requested.len()
            ),
        ));
    }

    let serialized_account_proof = serialize_proof(&raw.account_proof)?;
    let encoded_account_value = extract_account_value(&serialized_account_proof)?;
    debug!(
        nodes = raw.account_proof.len(),
        "serialized account proof"
    );

    let storage_proof = raw
        .storage_proof
        .into_iter()
        .zip(requested)
        .map(|(entry, expected)| {
            if &entry.key != expected {
                return Err(GatewayProofError::retrieval(
                    "eth_getProof",
                    format!("node returned proof for {}, expected {}", entry.key, expected),
                ));
            }
            let serialized_proof = serialize_proof(&entry.proof)?;
            debug!(key = %entry.key, nodes = entry.proof.len(), "serialized storage proof");
            Ok(StorageProofEntry {
                key: entry.key,
                value: entry.value,
                proof: entry.proof,
                serialized_proof,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProofResult {
        address: raw.address,
        account_proof: raw.account_proof,
        balance: raw.balance,
        code_hash: raw.code_hash,
        nonce: raw.nonce,
        storage_hash: raw.storage_hash,
        storage_proof,
        serialized_account_proof,
        encoded_account_value,
        block_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_proof_core::{HexBytes, RawStorageProof};
    use rlp::RlpStream;

    fn account_leaf() -> HexBytes {
        let mut account = RlpStream::new_list(4);
        account.append(&7u64);
        account.append(&0u64);
        account.append(&vec![0x11u8; 32]);
        account.append(&vec![0x22u8; 32]);
        let account = account.out().to_vec();

        let mut leaf = RlpStream::new_list(2);
        leaf.append(&vec![0x20u8, 0x01]);
        leaf.append(&account);
        HexBytes(leaf.out().to_vec())
    }

    fn raw_proof(keys: &[StorageSlotKey]) -> RawAccountProof {
        RawAccountProof {
            address: "0x01".into(),
            account_proof: vec![account_leaf()],
            balance: "0x0".into(),
            code_hash: HexBytes(vec![0x22; 32]),
            nonce: "0x7".into(),
            storage_hash: HexBytes(vec![0x11; 32]),
            storage_proof: keys
                .iter()
                .map(|key| RawStorageProof {
                    key: *key,
                    value: "0x1".into(),
                    proof: vec![HexBytes(vec![0xc2, 0x01, 0x02])],
                })
                .collect(),
        }
    }

    #[test]
    fn test_assemble_proof() {
        let keys = [StorageSlotKey::new([1; 32]), StorageSlotKey::new([2; 32])];
        let result = assemble_proof(raw_proof(&keys), &keys, "0x10".into()).unwrap();

        assert_eq!(result.block_number, "0x10");
        assert_eq!(result.storage_proof.len(), 2);
        assert_eq!(result.storage_proof[1].key, keys[1]);
        assert_eq!(
            result.storage_proof[0].serialized_proof.as_slice(),
            &[0xc3, 0xc2, 0x01, 0x02]
        );
        assert_eq!(result.encoded_account_value.len(), 70);
    }

    #[test]
    fn test_assemble_rejects_count_mismatch() {
        let keys = [StorageSlotKey::new([1; 32])];
        let err = assemble_proof(raw_proof(&[]), &keys, "0x10".into()).unwrap_err();
        assert!(matches!(err, GatewayProofError::ProofRetrieval { .. }));
    }

    #[test]
    fn test_assemble_rejects_unexpected_key() {
        let keys = [StorageSlotKey::new([1; 32])];
        let other = [StorageSlotKey::new([9; 32])];
        assert!(assemble_proof(raw_proof(&other), &keys, "0x10".into()).is_err());
    }

    #[test]
    fn test_assemble_is_all_or_nothing() {
        let keys = [StorageSlotKey::new([1; 32])];
        let mut raw = raw_proof(&keys);
        raw.storage_proof[0].proof.push(HexBytes(vec![0xc5, 0x01]));
        let err = assemble_proof(raw, &keys, "0x10".into()).unwrap_err();
        assert!(matches!(err, GatewayProofError::Serialization(_)));
    }

    #[test]
    fn test_assemble_reports_absent_account() {
        let mut raw = raw_proof(&[]);
        raw.account_proof = vec![HexBytes(vec![0xc0])];
        let err = assemble_proof(raw, &[], "latest".into()).unwrap_err();
        assert!(err.is_account_absent());
    }
}
