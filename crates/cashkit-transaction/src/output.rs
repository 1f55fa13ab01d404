//! Transaction output with amount and locking script.
//!
//! Defines the spending conditions for the output's value, with binary
//! (de)serialization following the Bitcoin wire format.

use cashkit_primitives::wire::{VarInt, WireReader, WireWriter};
use cashkit_script::Script;

use crate::TransactionError;

/// A single output in a transaction.
///
/// Each output carries an `amount` in satoshis and a `script_pubkey`
/// (locking script) that defines the conditions for spending it.
///
/// # Wire format
///
/// | Field          | Size          |
/// |----------------|---------------|
/// | amount         | 8 bytes (LE)  |
/// | script length  | VarInt        |
/// | script_pubkey  | variable      |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxOut {
    /// The amount in satoshis locked by this output.
    pub amount: u64,

    /// The locking script that defines spending conditions.
    pub script_pubkey: Script,
}

impl TxOut {
    /// Create an output paying the given amount to a locking script.
    ///
    /// # Arguments
    /// * `amount` - The amount in satoshis.
    /// * `script_pubkey` - The locking script.
    ///
    /// # Returns
    /// A new `TxOut`.
    pub fn new(amount: u64, script_pubkey: Script) -> Self {
        TxOut {
            amount,
            script_pubkey,
        }
    }

    /// Deserialize a `TxOut` from a wire reader, advancing its cursor.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded output.
    ///
    /// # Returns
    /// `Ok(TxOut)` on success, or a `TransactionError` if the data is
    /// truncated or the embedded script is malformed.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, TransactionError> {
        let amount = reader.read_u64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading amount: {}", e))
        })?;

        let script_len = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading script length: {}", e))
        })?;
        let script_bytes = reader
            .read_bytes(script_len.value() as usize)
            .map_err(|e| {
                TransactionError::SerializationError(format!("reading locking script: {}", e))
            })?;
        let script_pubkey = Script::from_bytes(script_bytes)?;

        Ok(TxOut {
            amount,
            script_pubkey,
        })
    }

    /// Deserialize a `TxOut` from the start of a byte slice.
    ///
    /// Trailing bytes beyond the encoded output are permitted; the
    /// consumed count lets the caller advance a cursor without
    /// re-scanning.
    ///
    /// # Arguments
    /// * `bytes` - Buffer beginning with a serialized output.
    ///
    /// # Returns
    /// `Ok((output, bytes_consumed))` on success.
    pub fn from_bytes(bytes: &[u8]) -> Result<(Self, usize), TransactionError> {
        let mut reader = WireReader::new(bytes);
        let output = Self::read_from(&mut reader)?;
        Ok((output, reader.position()))
    }

    /// Serialize this `TxOut` into a wire writer.
    ///
    /// # Arguments
    /// * `writer` - The writer to append serialized bytes to.
    ///
    /// # Returns
    /// `Ok(())`, or a script serialization error.
    pub fn write_to(&self, writer: &mut WireWriter) -> Result<(), TransactionError> {
        writer.write_u64_le(self.amount);
        let script_bytes = self.script_pubkey.to_bytes()?;
        writer.write_varint(VarInt::from(script_bytes.len()));
        writer.write_bytes(&script_bytes);
        Ok(())
    }

    /// Serialize this output to a byte vector.
    ///
    /// This is also the per-output form hashed by the fork-id signature
    /// digest.
    ///
    /// # Returns
    /// The wire-format bytes, or a script serialization error.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        let mut writer = WireWriter::new();
        self.write_to(&mut writer)?;
        Ok(writer.into_bytes())
    }
}
