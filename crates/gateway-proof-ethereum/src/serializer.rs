//! RLP serialization of Merkle-Patricia node paths
//!
//! A node path returned by `eth_getProof` is a list of individually
//! RLP-encoded trie nodes. Verifiers expect the whole path as a single RLP
//! list, so each node is decoded into its structural form and the forms are
//! re-encoded together. Only canonical encodings are accepted, which keeps
//! decode and re-encode byte-identical.

use gateway_proof_core::{to_quantity, AccountRecord, GatewayProofError, HexBytes};
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

/// Structural form of an RLP item: a byte string or a list of items
///
/// Trie nodes are lists (17 items for branches, 2 for leaves and
/// extensions) whose children are byte strings or embedded short nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeItem {
    Bytes(Vec<u8>),
    List(Vec<NodeItem>),
}

impl NodeItem {
    /// Canonical RLP encoding of this item
    pub fn to_rlp(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }

    /// Decode one item, rejecting trailing bytes and non-canonical forms
    pub fn from_rlp(bytes: &[u8]) -> Result<Self, DecoderError> {
        let item: NodeItem = rlp::decode(bytes)?;
        if item.to_rlp() != bytes {
            return Err(DecoderError::Custom("non-canonical or trailing data"));
        }
        Ok(item)
    }
}

impl Encodable for NodeItem {
    fn rlp_append(&self, s: &mut RlpStream) {
        match self {
            NodeItem::Bytes(bytes) => {
                s.append(bytes);
            }
            NodeItem::List(items) => {
                s.begin_list(items.len());
                for item in items {
                    item.rlp_append(s);
                }
            }
        }
    }
}

impl Decodable for NodeItem {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.is_list() {
            Ok(NodeItem::List(rlp.as_list()?))
        } else {
            Ok(NodeItem::Bytes(rlp.as_val::<Vec<u8>>()?))
        }
    }
}

/// Serialize a node path into one canonical RLP list
///
/// # Arguments
///
/// * `nodes` - RLP-encoded trie nodes, root first
///
/// # Returns
///
/// * `Ok(HexBytes)` - RLP list of the decoded nodes
/// * `Err(GatewayProofError::Serialization)` - a node failed to decode
pub fn serialize_proof(nodes: &[HexBytes]) -> Result<HexBytes, GatewayProofError> {
    let decoded = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            NodeItem::from_rlp(node.as_slice()).map_err(|e| {
                GatewayProofError::Serialization(format!("proof node {} ({}): {}", index, node, e))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HexBytes(NodeItem::List(decoded).to_rlp()))
}

/// Decode a serialized proof back into its nodes
pub fn decode_serialized_proof(serialized: &HexBytes) -> Result<Vec<NodeItem>, GatewayProofError> {
    match NodeItem::from_rlp(serialized.as_slice()) {
        Ok(NodeItem::List(nodes)) => Ok(nodes),
        Ok(NodeItem::Bytes(_)) => Err(GatewayProofError::Serialization(
            "serialized proof is not a list".to_string(),
        )),
        Err(e) => Err(GatewayProofError::Serialization(format!(
            "invalid serialized proof: {}",
            e
        ))),
    }
}

/// Extract the encoded account value from a serialized account proof
///
/// Takes the last element of the last node. A proof that does not end in an
/// account leaf fails with `Decoding`, which callers treat as "account absent
/// at this block".
pub fn extract_account_value(serialized: &HexBytes) -> Result<HexBytes, GatewayProofError> {
    let nodes = match NodeItem::from_rlp(serialized.as_slice()) {
        Ok(NodeItem::List(nodes)) => nodes,
        Ok(NodeItem::Bytes(_)) => {
            return Err(GatewayProofError::Decoding(
                "serialized account proof is not a list".to_string(),
            ))
        }
        Err(e) => {
            return Err(GatewayProofError::Decoding(format!(
                "invalid serialized account proof: {}",
                e
            )))
        }
    };

    let leaf = match nodes.last() {
        Some(NodeItem::List(fields)) => fields,
        Some(NodeItem::Bytes(_)) => {
            return Err(GatewayProofError::Decoding(
                "terminal account node is not a list".to_string(),
            ))
        }
        None => {
            return Err(GatewayProofError::Decoding(
                "account proof has no nodes".to_string(),
            ))
        }
    };

    match leaf.last() {
        Some(NodeItem::Bytes(value)) if !value.is_empty() => Ok(HexBytes(value.clone())),
        Some(NodeItem::Bytes(_)) => Err(GatewayProofError::Decoding(
            "terminal account node has an empty value".to_string(),
        )),
        Some(NodeItem::List(_)) => Err(GatewayProofError::Decoding(
            "terminal account node ends in an embedded node".to_string(),
        )),
        None => Err(GatewayProofError::Decoding(
            "terminal account node is empty".to_string(),
        )),
    }
}

/// Decode an encoded account value into its four fields
///
/// The leaf value is `rlp([nonce, balance, storageRoot, codeHash])`.
pub fn decode_account_record(encoded: &HexBytes) -> Result<AccountRecord, GatewayProofError> {
    let decoding = |e: DecoderError| GatewayProofError::Decoding(format!("account record: {}", e));

    let rlp = Rlp::new(encoded.as_slice());
    if !rlp.is_list() {
        return Err(GatewayProofError::Decoding(
            "account record is not a list".to_string(),
        ));
    }
    if rlp.payload_info().map_err(decoding)?.total() != encoded.len() {
        return Err(GatewayProofError::Decoding(
            "trailing bytes after account record".to_string(),
        ));
    }
    let count = rlp.item_count().map_err(decoding)?;
    if count != 4 {
        return Err(GatewayProofError::Decoding(format!(
            "account record has {} fields, expected 4",
            count
        )));
    }

    let nonce: Vec<u8> = rlp.val_at(0).map_err(decoding)?;
    let balance: Vec<u8> = rlp.val_at(1).map_err(decoding)?;
    let storage_root: Vec<u8> = rlp.val_at(2).map_err(decoding)?;
    let code_hash: Vec<u8> = rlp.val_at(3).map_err(decoding)?;

    for (name, hash) in [("storage root", &storage_root), ("code hash", &code_hash)] {
        if hash.len() != 32 {
            return Err(GatewayProofError::Decoding(format!(
                "{} is {} bytes, expected 32",
                name,
                hash.len()
            )));
        }
    }

    Ok(AccountRecord {
        nonce: to_quantity(&nonce),
        balance: to_quantity(&balance),
        storage_root: HexBytes(storage_root),
        code_hash: HexBytes(code_hash),
    })
}
