//! Transaction hash type.
//!
//! Provides `TxHash` — a 32-byte array displayed as byte-reversed hex,
//! matching Bitcoin's convention for transaction IDs. The bytes are
//! stored in protocol (wire) order; the hex form is display order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PrimitivesError;

/// Size of a transaction hash in bytes.
pub const HASH_SIZE: usize = 32;

/// A 32-byte transaction hash.
///
/// When displayed as a string, the bytes are reversed to match the
/// conventional representation of transaction IDs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct TxHash([u8; HASH_SIZE]);

impl TxHash {
    /// Create a TxHash from a raw 32-byte array.
    ///
    /// The bytes are stored as-is (protocol byte order).
    ///
    /// # Arguments
    /// * `bytes` - The 32 bytes in protocol order.
    ///
    /// # Returns
    /// A new `TxHash`.
    pub fn new(bytes: [u8; HASH_SIZE]) -> Self {
        TxHash(bytes)
    }

    /// Create a TxHash from a byte slice in protocol order.
    ///
    /// # Arguments
    /// * `bytes` - A slice that must be exactly 32 bytes.
    ///
    /// # Returns
    /// `Ok(TxHash)` if the slice is 32 bytes, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != HASH_SIZE {
            return Err(PrimitivesError::InvalidHash(format!(
                "invalid hash length of {}, want {}",
                bytes.len(),
                HASH_SIZE
            )));
        }
        let mut arr = [0u8; HASH_SIZE];
        arr.copy_from_slice(bytes);
        Ok(TxHash(arr))
    }

    /// Create a TxHash from a display-order hex string.
    ///
    /// The hex string represents bytes in display order; they are
    /// reversed into protocol order for storage.
    ///
    /// # Arguments
    /// * `hex_str` - A 64-character hex string.
    ///
    /// # Returns
    /// `Ok(TxHash)` on success, or an error for invalid input.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let decoded = hex::decode(hex_str)?;
        if decoded.len() != HASH_SIZE {
            return Err(PrimitivesError::InvalidHash(format!(
                "invalid hash hex length of {}, want {}",
                decoded.len(),
                HASH_SIZE
            )));
        }
        let mut arr = [0u8; HASH_SIZE];
        for (i, b) in decoded.iter().rev().enumerate() {
            arr[i] = *b;
        }
        Ok(TxHash(arr))
    }

    /// Encode as a display-order hex string (byte-reversed).
    ///
    /// # Returns
    /// A 64-character hex string.
    pub fn to_hex(&self) -> String {
        let mut reversed = self.0;
        reversed.reverse();
        hex::encode(reversed)
    }

    /// Return a reference to the internal protocol-order bytes.
    ///
    /// # Returns
    /// The 32 hash bytes in protocol order.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }
}

impl From<[u8; HASH_SIZE]> for TxHash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        TxHash(bytes)
    }
}

impl fmt::Display for TxHash {
    /// Display the hash as display-order hex.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for TxHash {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TxHash::from_hex(s)
    }
}

impl Serialize for TxHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TxHash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
