//! Core transaction type.
//!
//! Represents a complete transaction with version, inputs, outputs, and
//! lock time. Supports strict binary and hex (de)serialization,
//! transaction ID computation, and per-input signing via scriptSig
//! templates.

use cashkit_primitives::ec::PrivateKey;
use cashkit_primitives::hash::sha256d;
use cashkit_primitives::txhash::TxHash;
use cashkit_primitives::wire::{VarInt, WireReader, WireWriter};
use cashkit_script::Script;

use crate::input::TxIn;
use crate::output::TxOut;
use crate::sighash::{self, SIGHASH_ALL_FORKID};
use crate::template::{self, SigSlot};
use crate::TransactionError;

/// The only transaction format version this codec produces or accepts.
pub const TX_VERSION: u32 = 2;

/// A transaction consisting of a version, inputs, outputs, and a lock time.
///
/// A transaction is assembled once (inputs are signed one at a time,
/// each filling in that input's scriptSig) and treated as an immutable
/// value afterwards.
///
/// # Wire format
///
/// | Field        | Size                  |
/// |--------------|-----------------------|
/// | version      | 4 bytes (LE), always 2|
/// | input count  | VarInt                |
/// | inputs       | variable (per input)  |
/// | output count | VarInt                |
/// | outputs      | variable (per output) |
/// | lock_time    | 4 bytes (LE)          |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction format version. Fixed at 2; deserialization rejects
    /// any other value.
    pub version: u32,

    /// Ordered list of transaction inputs.
    pub inputs: Vec<TxIn>,

    /// Ordered list of transaction outputs.
    pub outputs: Vec<TxOut>,

    /// Lock time. If non-zero, the transaction is not valid until the
    /// specified block height or Unix timestamp.
    pub lock_time: u32,
}

impl Transaction {
    /// Create a transaction from its parts.
    ///
    /// # Arguments
    /// * `inputs` - The transaction inputs.
    /// * `outputs` - The transaction outputs.
    /// * `lock_time` - The lock time.
    ///
    /// # Returns
    /// A version-2 `Transaction`.
    pub fn new(inputs: Vec<TxIn>, outputs: Vec<TxOut>, lock_time: u32) -> Self {
        Transaction {
            version: TX_VERSION,
            inputs,
            outputs,
            lock_time,
        }
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a transaction from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string of the raw transaction bytes.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or a `TransactionError` if the hex
    /// is invalid or the bytes do not form a valid transaction.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str).map_err(|e| {
            TransactionError::SerializationError(format!("invalid hex: {}", e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes.
    ///
    /// The byte slice must contain exactly one complete transaction.
    /// After the output vector, exactly 4 bytes (the lock time) must
    /// remain; any other remainder is an error, so a round-trip through
    /// this codec is byte-exact.
    ///
    /// # Arguments
    /// * `bytes` - The raw transaction bytes.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success; `UnsupportedVersion` when the
    /// version field is not 2, `TrailingLength` when the remainder
    /// after the outputs is not the 4-byte lock time.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = WireReader::new(bytes);

        let version = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading version: {}", e))
        })?;
        if version != TX_VERSION {
            return Err(TransactionError::UnsupportedVersion(version));
        }

        let input_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading input count: {}", e))
        })?;
        // Preallocation is capped; counts come from untrusted input.
        let mut inputs = Vec::with_capacity(input_count.value().min(512) as usize);
        for _ in 0..input_count.value() {
            inputs.push(TxIn::read_from(&mut reader)?);
        }

        let output_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading output count: {}", e))
        })?;
        let mut outputs = Vec::with_capacity(output_count.value().min(512) as usize);
        for _ in 0..output_count.value() {
            outputs.push(TxOut::read_from(&mut reader)?);
        }

        if reader.remaining() != 4 {
            return Err(TransactionError::TrailingLength(reader.remaining()));
        }
        let lock_time = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading lock time: {}", e))
        })?;

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Serialize this transaction to raw bytes.
    ///
    /// # Returns
    /// The wire-format bytes: version(4) + varint(n_in) + inputs +
    /// varint(n_out) + outputs + locktime(4), or a script
    /// serialization error.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        let mut writer = WireWriter::with_capacity(256);
        writer.write_u32_le(self.version);

        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(&mut writer)?;
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(&mut writer)?;
        }

        writer.write_u32_le(self.lock_time);
        Ok(writer.into_bytes())
    }

    /// Serialize this transaction to a hex string.
    ///
    /// # Returns
    /// A lowercase hex-encoded string of the raw bytes.
    pub fn to_hex(&self) -> Result<String, TransactionError> {
        Ok(hex::encode(self.to_bytes()?))
    }

    // -----------------------------------------------------------------
    // Transaction ID
    // -----------------------------------------------------------------

    /// Compute the transaction ID (double SHA-256 of the serialized bytes).
    ///
    /// The hash is in protocol byte order; use `tx_id_hex` for the
    /// conventional display string.
    ///
    /// # Returns
    /// The transaction ID as a `TxHash`.
    pub fn tx_id(&self) -> Result<TxHash, TransactionError> {
        Ok(TxHash::new(sha256d(&self.to_bytes()?)))
    }

    /// Compute the transaction ID as a display-order hex string.
    ///
    /// # Returns
    /// A 64-character hex string, byte-reversed from the protocol-order
    /// hash.
    pub fn tx_id_hex(&self) -> Result<String, TransactionError> {
        Ok(self.tx_id()?.to_hex())
    }

    // -----------------------------------------------------------------
    // Building
    // -----------------------------------------------------------------

    /// Append a `TxIn` to this transaction.
    ///
    /// # Arguments
    /// * `input` - The input to add.
    pub fn add_input(&mut self, input: TxIn) {
        self.inputs.push(input);
    }

    /// Append an input spending the given previous output.
    ///
    /// # Arguments
    /// * `prev_txid` - The previous transaction ID as a display-order
    ///   hex string; it is byte-reversed into protocol order.
    /// * `vout` - The output index being spent.
    ///
    /// # Returns
    /// `Ok(())`, or an error if the hex is not a valid transaction ID.
    pub fn add_input_from(&mut self, prev_txid: &str, vout: u32) -> Result<(), TransactionError> {
        let hash = TxHash::from_hex(prev_txid)?;
        self.inputs.push(TxIn::new(*hash.as_bytes(), vout));
        Ok(())
    }

    /// Append a `TxOut` to this transaction.
    ///
    /// # Arguments
    /// * `output` - The output to add.
    pub fn add_output(&mut self, output: TxOut) {
        self.outputs.push(output);
    }

    /// Compute the sum of all output amounts.
    ///
    /// # Returns
    /// The total satoshis across all outputs.
    pub fn total_output_amount(&self) -> u64 {
        self.outputs.iter().map(|o| o.amount).sum()
    }

    // -----------------------------------------------------------------
    // Signing
    // -----------------------------------------------------------------

    /// Compute the signature digest for one input.
    ///
    /// Delegates to `sighash::signature_hash`; see that module for the
    /// two supported digest algorithms.
    ///
    /// # Arguments
    /// * `input_index` - Index of the input being signed.
    /// * `script_pubkey` - The locking script of the output being spent.
    /// * `sighash_type` - The hash type code (ALL or ALL|FORKID).
    /// * `amount` - The spent output's amount; required for ALL|FORKID.
    ///
    /// # Returns
    /// The 32-byte digest to be signed or verified.
    pub fn signature_hash(
        &self,
        input_index: usize,
        script_pubkey: &Script,
        sighash_type: u32,
        amount: Option<u64>,
    ) -> Result<[u8; 32], TransactionError> {
        sighash::signature_hash(self, input_index, script_pubkey, sighash_type, amount)
    }

    /// Fill an input's scriptSig from a template and pre-made signatures.
    ///
    /// Placeholders in the template are replaced left-to-right by the
    /// supplied signatures.
    ///
    /// # Arguments
    /// * `input_index` - Index of the input to fill.
    /// * `template` - The scriptSig template.
    /// * `signatures` - The signature byte strings (hash-type byte
    ///   already appended).
    ///
    /// # Returns
    /// `Ok(())`, or `MissingSignature` when the template has more
    /// placeholders than signatures.
    pub fn sign_input_with_signatures(
        &mut self,
        input_index: usize,
        template: &[SigSlot],
        signatures: &[Vec<u8>],
    ) -> Result<(), TransactionError> {
        if input_index >= self.inputs.len() {
            return Err(TransactionError::InputIndexOutOfRange {
                index: input_index,
                len: self.inputs.len(),
            });
        }
        let script_sig = template::fill(template, signatures)?;
        self.inputs[input_index].script_sig = script_sig;
        Ok(())
    }

    /// Sign one input with the given private keys.
    ///
    /// Computes the ALL|FORKID digest for the input, signs it with each
    /// key in order, appends the 1-byte hash type to each DER signature,
    /// and substitutes the signatures into the template to form the
    /// input's scriptSig.
    ///
    /// # Arguments
    /// * `input_index` - Index of the input to sign.
    /// * `script_pubkey` - The locking script of the output being spent.
    /// * `template` - The scriptSig template with signature placeholders.
    /// * `keys` - The private keys; one signature is produced per key.
    /// * `amount` - The spent output's amount (required by the fork-id
    ///   digest).
    ///
    /// # Returns
    /// `Ok(())` on success, or the underlying digest/signing/template
    /// error.
    pub fn sign_input(
        &mut self,
        input_index: usize,
        script_pubkey: &Script,
        template: &[SigSlot],
        keys: &[PrivateKey],
        amount: Option<u64>,
    ) -> Result<(), TransactionError> {
        let digest =
            self.signature_hash(input_index, script_pubkey, SIGHASH_ALL_FORKID, amount)?;

        let mut signatures = Vec::with_capacity(keys.len());
        for key in keys {
            let signature = key.sign(&digest)?;
            let mut buf = signature.to_der();
            buf.push(SIGHASH_ALL_FORKID as u8);
            signatures.push(buf);
        }

        self.sign_input_with_signatures(input_index, template, &signatures)
    }
}
