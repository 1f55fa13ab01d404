//! Element-based Bitcoin Cash script type.
//!
//! A `Script` is an ordered sequence of `ScriptElement` values, each
//! either a standalone opcode or a data push. Insertion order is
//! execution order. Scripts serialize to the standard wire form where
//! byte values 0x00-0x4e signal push lengths and everything above is
//! an opcode byte.

use std::fmt;

use cashkit_primitives::wire::{WireReader, WireWriter};

use crate::opcodes::*;
use crate::ScriptError;

/// Maximum length of a direct push (length encoded in the opcode byte).
const MAX_DIRECT_PUSH: usize = 0x4b;

/// A single element of a script.
///
/// Scripts mix opcodes and data pushes in one ordered sequence; the
/// tagged variant makes serialization dispatch explicit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptElement {
    /// A single-byte opcode. Well-formed values are above 0x4e; the
    /// range 0x00-0x4e belongs to push-length signaling.
    Op(u8),
    /// A data push of arbitrary bytes.
    Data(Vec<u8>),
}

impl ScriptElement {
    /// Serialize this element into a wire writer.
    ///
    /// Data pushes use the minimal length prefix: a direct push for up
    /// to 0x4b bytes, OP_PUSHDATA1/2/4 beyond that. Opcode elements are
    /// written as-is; values in the push range are rejected since they
    /// could not round-trip as opcodes.
    ///
    /// # Arguments
    /// * `writer` - The writer to append serialized bytes to.
    ///
    /// # Returns
    /// `Ok(())` on success, or an error for an oversized push or a
    /// reserved opcode value.
    fn write_to(&self, writer: &mut WireWriter) -> Result<(), ScriptError> {
        match self {
            ScriptElement::Data(data) => {
                let len = data.len();
                if len <= MAX_DIRECT_PUSH {
                    writer.write_u8(len as u8);
                } else if len <= 0xff {
                    writer.write_u8(OP_PUSHDATA1);
                    writer.write_u8(len as u8);
                } else if len <= 0xffff {
                    writer.write_u8(OP_PUSHDATA2);
                    writer.write_u16_le(len as u16);
                } else if len <= 0xffff_ffff {
                    writer.write_u8(OP_PUSHDATA4);
                    writer.write_u32_le(len as u32);
                } else {
                    return Err(ScriptError::DataTooBig);
                }
                writer.write_bytes(data);
                Ok(())
            }
            ScriptElement::Op(op) => {
                if *op <= OP_PUSHDATA4 {
                    return Err(ScriptError::ReservedPushOpcode(*op));
                }
                writer.write_u8(*op);
                Ok(())
            }
        }
    }

    /// Render this element as an ASM-style token.
    ///
    /// Data pushes appear as hex; opcodes by name where known.
    fn to_asm_string(&self) -> String {
        match self {
            ScriptElement::Data(data) => hex::encode(data),
            ScriptElement::Op(op) => match opcode_name(*op) {
                Some(name) => name.to_string(),
                None => format!("OP_0x{:02x}", op),
            },
        }
    }
}

/// A Bitcoin Cash script: an ordered sequence of opcodes and data pushes.
///
/// Scripts are built once (via the constructors or the standard output
/// builders) and treated as immutable values afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Script(Vec<ScriptElement>);

impl Script {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new empty script.
    ///
    /// An unsigned transaction input carries an empty script, which
    /// serializes to zero bytes.
    ///
    /// # Returns
    /// An empty `Script`.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a sequence of elements.
    ///
    /// # Arguments
    /// * `elements` - The opcodes and data pushes, in execution order.
    ///
    /// # Returns
    /// A `Script` owning the given elements.
    pub fn from_elements(elements: Vec<ScriptElement>) -> Self {
        Script(elements)
    }

    /// Create a script from a hex-encoded wire string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "76a914...88ac").
    ///
    /// # Returns
    /// The parsed `Script`, or an error if the hex or wire form is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    // -----------------------------------------------------------------------
    // Standard output builders
    // -----------------------------------------------------------------------

    /// Build the standard pay-to-public-key-hash locking script.
    ///
    /// Produces `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`.
    /// For a 20-byte hash this serializes to exactly 25 bytes.
    ///
    /// # Arguments
    /// * `pubkey_hash` - The Hash160 of the destination public key.
    ///
    /// # Returns
    /// The P2PKH locking script.
    pub fn standard_pubkey(pubkey_hash: &[u8]) -> Self {
        Script(vec![
            ScriptElement::Op(OP_DUP),
            ScriptElement::Op(OP_HASH160),
            ScriptElement::Data(pubkey_hash.to_vec()),
            ScriptElement::Op(OP_EQUALVERIFY),
            ScriptElement::Op(OP_CHECKSIG),
        ])
    }

    /// Build a 2-of-N multi-signature locking script.
    ///
    /// Produces `OP_2 <key_1> ... <key_N> OP_N OP_CHECKMULTISIG` where
    /// OP_N encodes the key count as a small-integer opcode.
    ///
    /// # Arguments
    /// * `pub_keys` - The public keys; 2 to 16 of them.
    ///
    /// # Returns
    /// The multisig locking script, or `MultisigKeyCount` when the key
    /// count is outside 2..=16.
    pub fn multisig_pubkey(pub_keys: &[Vec<u8>]) -> Result<Self, ScriptError> {
        let n = pub_keys.len();
        if !(2..=16).contains(&n) {
            return Err(ScriptError::MultisigKeyCount(n));
        }
        let op_n = OP_2 + (n as u8 - 2);

        let mut elements = Vec::with_capacity(n + 3);
        elements.push(ScriptElement::Op(OP_2));
        for key in pub_keys {
            elements.push(ScriptElement::Data(key.clone()));
        }
        elements.push(ScriptElement::Op(op_n));
        elements.push(ScriptElement::Op(OP_CHECKMULTISIG));
        Ok(Script(elements))
    }

    /// Build a data-publishing locking script.
    ///
    /// Produces `OP_RETURN <data>`, an unspendable output carrying
    /// arbitrary data. Relay policy caps the payload (historically 40
    /// bytes) but no limit is enforced here.
    ///
    /// # Arguments
    /// * `data` - The data to embed.
    ///
    /// # Returns
    /// The data locking script.
    pub fn data_pubkey(data: &[u8]) -> Self {
        Script(vec![
            ScriptElement::Op(OP_RETURN),
            ScriptElement::Data(data.to_vec()),
        ])
    }

    // -----------------------------------------------------------------------
    // Wire serialization
    // -----------------------------------------------------------------------

    /// Serialize the script to its wire byte form.
    ///
    /// # Returns
    /// The serialized bytes, or an error for an oversized push or a
    /// reserved opcode value.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ScriptError> {
        let mut writer = WireWriter::new();
        for element in &self.0 {
            element.write_to(&mut writer)?;
        }
        Ok(writer.into_bytes())
    }

    /// Serialize the script to a lowercase hex string.
    ///
    /// # Returns
    /// The hex wire form, or a serialization error.
    pub fn to_hex(&self) -> Result<String, ScriptError> {
        Ok(hex::encode(self.to_bytes()?))
    }

    /// Parse a script from its wire byte form.
    ///
    /// Bytes are consumed sequentially until the buffer is exhausted;
    /// values up to 0x4e are data pushes per the length rules, all
    /// other bytes become opcode elements. A push whose declared length
    /// overruns the buffer fails closed with `DataTooSmall`.
    ///
    /// # Arguments
    /// * `bytes` - The raw script bytes.
    ///
    /// # Returns
    /// The parsed `Script`, or `DataTooSmall` on a truncated push.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ScriptError> {
        let mut reader = WireReader::new(bytes);
        let mut elements = Vec::new();

        while reader.remaining() > 0 {
            let opcode = reader
                .read_u8()
                .map_err(|_| ScriptError::DataTooSmall)?;

            if opcode <= OP_PUSHDATA4 {
                let length = match opcode {
                    OP_PUSHDATA1 => reader
                        .read_u8()
                        .map_err(|_| ScriptError::DataTooSmall)?
                        as usize,
                    OP_PUSHDATA2 => reader
                        .read_u16_le()
                        .map_err(|_| ScriptError::DataTooSmall)?
                        as usize,
                    OP_PUSHDATA4 => reader
                        .read_u32_le()
                        .map_err(|_| ScriptError::DataTooSmall)?
                        as usize,
                    direct => direct as usize,
                };
                let data = reader
                    .read_bytes(length)
                    .map_err(|_| ScriptError::DataTooSmall)?;
                elements.push(ScriptElement::Data(data.to_vec()));
            } else {
                elements.push(ScriptElement::Op(opcode));
            }
        }

        Ok(Script(elements))
    }

    // -----------------------------------------------------------------------
    // Accessors & classification
    // -----------------------------------------------------------------------

    /// Return the script elements in execution order.
    ///
    /// # Returns
    /// A slice of the elements.
    pub fn elements(&self) -> &[ScriptElement] {
        &self.0
    }

    /// Return the number of elements in the script.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the script has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if this is a pay-to-public-key-hash locking script.
    ///
    /// Pattern: `OP_DUP OP_HASH160 <data> OP_EQUALVERIFY OP_CHECKSIG`.
    ///
    /// # Returns
    /// `true` if the element sequence matches the P2PKH template.
    pub fn is_p2pkh(&self) -> bool {
        matches!(
            self.0.as_slice(),
            [
                ScriptElement::Op(OP_DUP),
                ScriptElement::Op(OP_HASH160),
                ScriptElement::Data(_),
                ScriptElement::Op(OP_EQUALVERIFY),
                ScriptElement::Op(OP_CHECKSIG),
            ]
        )
    }

    /// Extract the public key hash from a P2PKH locking script.
    ///
    /// # Returns
    /// The pushed hash bytes if the script matches the P2PKH template,
    /// otherwise `None`.
    pub fn pubkey_hash(&self) -> Option<&[u8]> {
        if !self.is_p2pkh() {
            return None;
        }
        match &self.0[2] {
            ScriptElement::Data(hash) => Some(hash),
            _ => None,
        }
    }
}

impl fmt::Display for Script {
    /// Display the script as space-separated ASM-style tokens.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| e.to_asm_string()).collect();
        write!(f, "{}", parts.join(" "))
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let hex_str = self.to_hex().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
