//! Proof data types
//!
//! This module contains the raw shapes returned by a ledger node's
//! `eth_getProof` call and the verifier-ready [`ProofResult`] assembled from
//! them. Field names on the wire follow the JSON-RPC response so that a
//! serialized result can be handed to existing verifier tooling unchanged.

use serde::{Deserialize, Serialize};

use crate::{normalize_quantity, strip_hex_prefix, GatewayProofError, HexBytes, StorageSlotKey};

/// Storage proof for one slot as returned by the node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStorageProof {
    pub key: StorageSlotKey,
    /// Stored value as a JSON-RPC quantity
    pub value: String,
    /// Node path from the storage root to the slot
    pub proof: Vec<HexBytes>,
}

/// Account proof as returned by `eth_getProof`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAccountProof {
    pub address: String,
    /// Node path from the state root to the account leaf
    pub account_proof: Vec<HexBytes>,
    pub balance: String,
    pub code_hash: HexBytes,
    pub nonce: String,
    pub storage_hash: HexBytes,
    pub storage_proof: Vec<RawStorageProof>,
}

/// Minimal block header view used to pin a proof to a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    /// Block number as a JSON-RPC quantity
    pub number: String,
    #[serde(default)]
    pub hash: Option<HexBytes>,
    #[serde(default)]
    pub state_root: Option<HexBytes>,
}

impl BlockSummary {
    /// Parse the block number
    pub fn number(&self) -> Result<u64, GatewayProofError> {
        u64::from_str_radix(strip_hex_prefix(&self.number), 16)
            .map_err(|e| GatewayProofError::retrieval(format!("invalid block number '{}'", self.number), e))
    }

    /// Block number re-encoded as `0x`-prefixed lowercase hex
    pub fn number_hex(&self) -> Result<String, GatewayProofError> {
        Ok(format!("{:#x}", self.number()?))
    }
}

/// Verifier-ready proof for one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageProofEntry {
    pub key: StorageSlotKey,
    pub value: String,
    pub proof: Vec<HexBytes>,
    /// RLP list of the decoded nodes of `proof`
    pub serialized_proof: HexBytes,
}

/// Everything a verifier needs to check an account and its storage slots
///
/// Built once per request and never mutated afterwards. `storage_proof`
/// holds exactly one entry per requested slot key, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofResult {
    pub address: String,
    pub account_proof: Vec<HexBytes>,
    pub balance: String,
    pub code_hash: HexBytes,
    pub nonce: String,
    pub storage_hash: HexBytes,
    pub storage_proof: Vec<StorageProofEntry>,
    /// RLP list of the decoded nodes of `account_proof`
    pub serialized_account_proof: HexBytes,
    /// RLP-encoded account record taken from the account leaf
    pub encoded_account_value: HexBytes,
    /// Block the proof was taken at
    #[serde(rename = "block_number")]
    pub block_number: String,
}

impl ProofResult {
    /// Storage proof entry for a slot key, if it was requested
    pub fn storage_entry(&self, key: &StorageSlotKey) -> Option<&StorageProofEntry> {
        self.storage_proof.iter().find(|entry| &entry.key == key)
    }
}

/// Decoded account leaf: `(nonce, balance, code hash, storage root)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    /// Nonce as a JSON-RPC quantity
    pub nonce: String,
    /// Balance as a JSON-RPC quantity
    pub balance: String,
    pub storage_root: HexBytes,
    pub code_hash: HexBytes,
}

impl AccountRecord {
    /// Whether the decoded leaf agrees with the fields the node reported
    pub fn is_consistent_with(&self, result: &ProofResult) -> bool {
        normalize_quantity(&self.nonce) == normalize_quantity(&result.nonce)
            && normalize_quantity(&self.balance) == normalize_quantity(&result.balance)
            && self.storage_root == result.storage_hash
            && self.code_hash == result.code_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GET_PROOF_RESPONSE: &str = r#"{
        "address": "0xbf4263c8842b48c2f7cb1ceb237ae0207952edab",
        "accountProof": ["0xc180", "0xc20102"],
        "balance": "0x0",
        "codeHash": "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470",
        "nonce": "0x1",
        "storageHash": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "storageProof": [
            {"key": "0x0", "value": "0x0", "proof": []}
        ]
    }"#;

    #[test]
    fn test_raw_proof_deserialization() {
        let raw: RawAccountProof = serde_json::from_str(GET_PROOF_RESPONSE).unwrap();
        assert_eq!(raw.account_proof.len(), 2);
        assert_eq!(raw.account_proof[0].as_slice(), &[0xc1, 0x80]);
        assert_eq!(raw.storage_proof.len(), 1);
        assert_eq!(raw.storage_proof[0].key, StorageSlotKey::new([0u8; 32]));
        assert_eq!(raw.code_hash.len(), 32);
    }

    #[test]
    fn test_block_summary_number() {
        let block: BlockSummary =
            serde_json::from_str(r#"{"number": "0x01b4", "hash": null, "miner": "0x00"}"#).unwrap();
        assert_eq!(block.number().unwrap(), 436);
        assert_eq!(block.number_hex().unwrap(), "0x1b4");
        assert!(block.hash.is_none());

        let bad = BlockSummary {
            number: "pending".into(),
            hash: None,
            state_root: None,
        };
        assert!(matches!(
            bad.number(),
            Err(GatewayProofError::ProofRetrieval { .. })
        ));
    }

    #[test]
    fn test_proof_result_wire_names() {
        let result = ProofResult {
            address: "0x01".into(),
            account_proof: vec![],
            balance: "0x0".into(),
            code_hash: HexBytes::default(),
            nonce: "0x0".into(),
            storage_hash: HexBytes::default(),
            storage_proof: vec![StorageProofEntry {
                key: StorageSlotKey::new([1u8; 32]),
                value: "0x2".into(),
                proof: vec![],
                serialized_proof: HexBytes(vec![0xc0]),
            }],
            serialized_account_proof: HexBytes(vec![0xc0]),
            encoded_account_value: HexBytes::default(),
            block_number: "0x10".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["block_number"], "0x10");
        assert_eq!(json["serializedAccountProof"], "0xc0");
        assert_eq!(json["storageProof"][0]["serializedProof"], "0xc0");
        assert!(json.get("encodedAccountValue").is_some());

        let key = StorageSlotKey::new([1u8; 32]);
        assert_eq!(result.storage_entry(&key).unwrap().value, "0x2");
        assert!(result.storage_entry(&StorageSlotKey::new([2u8; 32])).is_none());
    }
}
