//! Ethereum slot resolver for message box storage keys
//!
//! This module converts a storage declaration offset and an optional list of
//! mapping keys into the 32-byte key that addresses the value in a contract's
//! storage trie, following Solidity's storage layout rules.

use gateway_proof_core::{strip_hex_prefix, GatewayProofError, MappingFold, StorageSlotKey};
use tiny_keccak::{Hasher, Keccak};

/// Ethereum slot resolver implementing Solidity mapping key derivation
///
/// # Storage Key Derivation
///
/// ## Bare offset
/// With no mapping keys the slot key is `keccak256(pad32(offset))`, which
/// proves the message box root itself.
///
/// ## Concatenated fold (default)
/// `keccak256(pad32(k1) ++ ... ++ pad32(kn) ++ pad32(offset))`, hashed once.
/// This is exact for single-level mappings, which is all the gateway's
/// message boxes use.
///
/// ## Nested fold
/// Each level hashes the padded key with the previous level's slot:
/// `slot_0 = pad32(offset)`, `slot_i = keccak256(pad32(k_i) ++ slot_{i-1})`.
/// Required for doubly or triply nested mappings.
///
/// Padding is always to 32 bytes, value right-justified with zero nibbles on
/// the left. Keys wider than 32 bytes are used whole.
///
/// # Examples
///
/// ```rust,ignore
/// use gateway_proof_ethereum::EthereumSlotResolver;
///
/// let resolver = EthereumSlotResolver::default();
///
/// // The outbox root
/// let root = resolver.derive_slot_key("9", &[] as &[&str])?;
///
/// // One outbox entry
/// let entry = resolver.derive_slot_key("9", &["0xfae36c71e25c3026c43f5316caaa308463f1245861775a7ce298ddc00327b78a"])?;
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EthereumSlotResolver {
    fold: MappingFold,
}

impl EthereumSlotResolver {
    /// Create a resolver using the given mapping key fold
    pub fn new(fold: MappingFold) -> Self {
        Self { fold }
    }

    pub fn fold(&self) -> MappingFold {
        self.fold
    }

    /// Compute keccak256 hash
    ///
    /// # Arguments
    ///
    /// * `data` - Input data to hash
    ///
    /// # Returns
    ///
    /// 32-byte Keccak256 hash of the input
    pub fn keccak256(data: &[u8]) -> [u8; 32] {
        let mut hasher = Keccak::v256();
        let mut output = [0u8; 32];
        hasher.update(data);
        hasher.finalize(&mut output);
        output
    }

    /// Derive the storage slot key for `offset` indexed by `keys`
    ///
    /// # Arguments
    ///
    /// * `offset` - Declaration offset as hex (`"9"`, `"0x0a"`)
    /// * `keys` - Mapping keys as hex words, outermost first
    ///
    /// # Returns
    ///
    /// * `Ok(StorageSlotKey)` - The derived key
    /// * `Err(GatewayProofError::Encoding)` - Malformed hex input
    pub fn derive_slot_key<S: AsRef<str>>(
        &self,
        offset: &str,
        keys: &[S],
    ) -> Result<StorageSlotKey, GatewayProofError> {
        let offset_word = pad_offset(offset)?;

        if keys.is_empty() {
            return Ok(StorageSlotKey::new(Self::keccak256(&offset_word)));
        }

        match self.fold {
            MappingFold::Concatenated => {
                let mut data = Vec::with_capacity(32 * (keys.len() + 1));
                for key in keys {
                    data.extend_from_slice(&pad_word(key.as_ref())?);
                }
                data.extend_from_slice(&offset_word);
                Ok(StorageSlotKey::new(Self::keccak256(&data)))
            }
            MappingFold::Nested => {
                let mut slot = offset_word;
                for key in keys {
                    let mut data = pad_word(key.as_ref())?;
                    data.extend_from_slice(&slot);
                    slot = Self::keccak256(&data);
                }
                Ok(StorageSlotKey::new(slot))
            }
        }
    }
}

/// Derive a slot key with the default concatenated fold
pub fn derive_slot_key<S: AsRef<str>>(
    offset: &str,
    keys: &[S],
) -> Result<StorageSlotKey, GatewayProofError> {
    EthereumSlotResolver::default().derive_slot_key(offset, keys)
}

/// Left-pad a hex word to 32 bytes; wider words are decoded whole
fn pad_word(word: &str) -> Result<Vec<u8>, GatewayProofError> {
    let digits = strip_hex_prefix(word);
    if digits.len() <= 64 {
        Ok(hex::decode(format!("{:0>64}", digits))?)
    } else if digits.len() % 2 == 0 {
        Ok(hex::decode(digits)?)
    } else {
        Err(GatewayProofError::Encoding(format!(
            "mapping key '{}' has odd length {}",
            word,
            digits.len()
        )))
    }
}

/// Left-pad a declaration offset to exactly 32 bytes
fn pad_offset(offset: &str) -> Result<[u8; 32], GatewayProofError> {
    let digits = strip_hex_prefix(offset);
    if digits.len() > 64 {
        return Err(GatewayProofError::Encoding(format!(
            "storage offset '{}' is wider than 32 bytes",
            offset
        )));
    }
    let mut word = [0u8; 32];
    hex::decode_to_slice(format!("{:0>64}", digits), &mut word)?;
    Ok(word)
}
