//! Key and byte-string types for storage proofs
//!
//! Everything that crosses the wire is `0x`-prefixed lowercase hex. The types
//! in this module own that convention so the rest of the workspace can work
//! with raw bytes.

use core::fmt;
use core::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::GatewayProofError;

/// Strip an optional `0x` / `0X` prefix from a hex string
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Format big-endian bytes as a JSON-RPC quantity (`0x0`, `0x1a`, ...)
pub fn to_quantity(bytes: &[u8]) -> String {
    let digits = hex::encode(bytes);
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{}", trimmed)
    }
}

/// Normalize a quantity string for comparison (lowercase, no leading zeros)
pub fn normalize_quantity(s: &str) -> String {
    let digits = strip_hex_prefix(s).to_ascii_lowercase();
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{}", trimmed)
    }
}

/// A 32-byte storage slot identifier
///
/// Slot keys address one word of a contract's storage trie. They are
/// serialized as `0x` followed by 64 hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageSlotKey(pub [u8; 32]);

impl StorageSlotKey {
    /// Wrap raw key bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw key bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Full-width `0x`-prefixed hex form
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse a hex key, left-padding values shorter than 32 bytes
    ///
    /// Nodes may echo keys back in quantity form (`0x0`), so short inputs are
    /// accepted and right-justified.
    pub fn from_hex(s: &str) -> Result<Self, GatewayProofError> {
        let digits = strip_hex_prefix(s);
        if digits.len() > 64 {
            return Err(GatewayProofError::Encoding(format!(
                "storage key wider than 32 bytes: {}",
                s
            )));
        }
        let padded = format!("{:0>64}", digits);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(&padded, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl From<[u8; 32]> for StorageSlotKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for StorageSlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for StorageSlotKey {
    type Err = GatewayProofError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for StorageSlotKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for StorageSlotKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(de::Error::custom)
    }
}

/// An arbitrary-length byte string carried as `0x`-prefixed hex
///
/// Used for trie nodes, serialized proofs and hashes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HexBytes(pub Vec<u8>);

impl HexBytes {
    /// Parse `0x`-prefixed (or bare) hex; odd-length input is rejected
    pub fn from_hex(s: &str) -> Result<Self, GatewayProofError> {
        Ok(Self(hex::decode(strip_hex_prefix(s))?))
    }

    /// `0x`-prefixed hex form
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }

    /// Borrow the raw bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Consume into the raw bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no bytes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for HexBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for HexBytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for HexBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for HexBytes {
    type Err = GatewayProofError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for HexBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HexBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_key_left_pads_short_input() {
        let key = StorageSlotKey::from_hex("0x9").unwrap();
        assert_eq!(key.0[31], 0x09);
        assert_eq!(&key.0[..31], &[0u8; 31]);
        assert_eq!(
            key.to_hex(),
            "0x0000000000000000000000000000000000000000000000000000000000000009"
        );
    }

    #[test]
    fn test_slot_key_rejects_wide_input() {
        let wide = format!("0x{}", "1".repeat(66));
        assert!(matches!(
            StorageSlotKey::from_hex(&wide),
            Err(GatewayProofError::Encoding(_))
        ));
    }

    #[test]
    fn test_slot_key_rejects_invalid_chars() {
        assert!(StorageSlotKey::from_hex("0xzz").is_err());
    }

    #[test]
    fn test_slot_key_serde_uses_prefixed_hex() {
        let key = StorageSlotKey::new([0xab; 32]);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(32)));
        let back: StorageSlotKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_hex_bytes_parsing() {
        let bytes = HexBytes::from_hex("0xdeadbeef").unwrap();
        assert_eq!(bytes.as_slice(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(bytes.to_string(), "0xdeadbeef");

        assert!(HexBytes::from_hex("0xabc").is_err());
        assert!(HexBytes::from_hex("0x").unwrap().is_empty());
    }

    #[test]
    fn test_quantities() {
        assert_eq!(to_quantity(&[]), "0x0");
        assert_eq!(to_quantity(&[0x00, 0x1a]), "0x1a");
        assert_eq!(to_quantity(&[0x01, 0x00]), "0x100");
        assert_eq!(normalize_quantity("0x00FF"), "0xff");
        assert_eq!(normalize_quantity("0x"), "0x0");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn slot_key_hex_round_trips(bytes in prop::array::uniform32(any::<u8>())) {
                let key = StorageSlotKey::new(bytes);
                let hex = key.to_hex();
                prop_assert_eq!(hex.len(), 66);
                prop_assert_eq!(StorageSlotKey::from_hex(&hex).unwrap(), key);
                prop_assert_eq!(hex.to_uppercase().parse::<StorageSlotKey>().unwrap(), key);
            }

            #[test]
            fn short_slot_keys_are_right_justified(value in any::<u64>()) {
                let key = StorageSlotKey::from_hex(&format!("{:#x}", value)).unwrap();
                prop_assert_eq!(&key.0[..24], &[0u8; 24][..]);
                prop_assert_eq!(&key.0[24..], &value.to_be_bytes()[..]);
            }

            #[test]
            fn hex_bytes_round_trip(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
                let encoded = HexBytes(bytes.clone()).to_hex();
                prop_assert_eq!(HexBytes::from_hex(&encoded).unwrap().into_inner(), bytes);
            }
        }
    }
}
