//! Transaction input referencing a previous output.
//!
//! Contains the previous output's transaction hash and index, the
//! unlocking script, and the sequence number, with binary
//! (de)serialization following the Bitcoin wire format.

use cashkit_primitives::wire::{VarInt, WireReader, WireWriter};
use cashkit_script::Script;

use crate::TransactionError;

/// Default sequence number indicating a finalized input.
pub const DEFAULT_SEQUENCE: u32 = 0xFFFF_FFFF;

/// A single input in a transaction.
///
/// Each input references an output of a previous transaction by hash
/// and index. The `script_sig` supplies the data required to satisfy
/// the referenced output's locking script; it starts empty and is
/// filled in during signing.
///
/// # Wire format
///
/// | Field          | Size          |
/// |----------------|---------------|
/// | prev_out_hash  | 32 bytes      |
/// | prev_out_index | 4 bytes (LE)  |
/// | script length  | VarInt        |
/// | script_sig     | variable      |
/// | sequence       | 4 bytes (LE)  |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxIn {
    /// The 32-byte hash of the transaction whose output is spent,
    /// stored in protocol byte order (reversed relative to the
    /// conventional display order of transaction IDs).
    pub prev_out_hash: [u8; 32],

    /// Index of the output within the previous transaction.
    pub prev_out_index: u32,

    /// The unlocking script proving authorization. Empty until signed.
    pub script_sig: Script,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence: u32,
}

impl TxIn {
    /// Create an input spending the given previous output.
    ///
    /// The scriptSig starts empty (filled in later by signing) and the
    /// sequence number is finalized.
    ///
    /// # Arguments
    /// * `prev_out_hash` - The previous transaction hash, protocol order.
    /// * `prev_out_index` - The output index within that transaction.
    ///
    /// # Returns
    /// A new unsigned `TxIn`.
    pub fn new(prev_out_hash: [u8; 32], prev_out_index: u32) -> Self {
        TxIn {
            prev_out_hash,
            prev_out_index,
            script_sig: Script::new(),
            sequence: DEFAULT_SEQUENCE,
        }
    }

    /// Deserialize a `TxIn` from a wire reader, advancing its cursor.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded input.
    ///
    /// # Returns
    /// `Ok(TxIn)` on success, or a `TransactionError` if the data is
    /// truncated or the embedded script is malformed.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, TransactionError> {
        let hash_bytes = reader.read_bytes(32).map_err(|e| {
            TransactionError::SerializationError(format!("reading previous output hash: {}", e))
        })?;
        let mut prev_out_hash = [0u8; 32];
        prev_out_hash.copy_from_slice(hash_bytes);

        let prev_out_index = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading previous output index: {}", e))
        })?;

        let script_len = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading script length: {}", e))
        })?;
        let script_bytes = reader
            .read_bytes(script_len.value() as usize)
            .map_err(|e| {
                TransactionError::SerializationError(format!("reading unlocking script: {}", e))
            })?;
        let script_sig = Script::from_bytes(script_bytes)?;

        let sequence = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading sequence number: {}", e))
        })?;

        Ok(TxIn {
            prev_out_hash,
            prev_out_index,
            script_sig,
            sequence,
        })
    }

    /// Deserialize a `TxIn` from the start of a byte slice.
    ///
    /// Trailing bytes beyond the encoded input are permitted; the
    /// consumed count lets the caller advance a cursor without
    /// re-scanning.
    ///
    /// # Arguments
    /// * `bytes` - Buffer beginning with a serialized input.
    ///
    /// # Returns
    /// `Ok((input, bytes_consumed))` on success.
    pub fn from_bytes(bytes: &[u8]) -> Result<(Self, usize), TransactionError> {
        let mut reader = WireReader::new(bytes);
        let input = Self::read_from(&mut reader)?;
        Ok((input, reader.position()))
    }

    /// Serialize this `TxIn` into a wire writer.
    ///
    /// # Arguments
    /// * `writer` - The writer to append serialized bytes to.
    ///
    /// # Returns
    /// `Ok(())`, or a script serialization error.
    pub fn write_to(&self, writer: &mut WireWriter) -> Result<(), TransactionError> {
        writer.write_bytes(&self.prev_out_hash);
        writer.write_u32_le(self.prev_out_index);

        let script_bytes = self.script_sig.to_bytes()?;
        writer.write_varint(VarInt::from(script_bytes.len()));
        writer.write_bytes(&script_bytes);

        writer.write_u32_le(self.sequence);
        Ok(())
    }

    /// Serialize this input to a byte vector.
    ///
    /// # Returns
    /// The wire-format bytes, or a script serialization error.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        let mut writer = WireWriter::new();
        self.write_to(&mut writer)?;
        Ok(writer.into_bytes())
    }
}
