/// Error types for script and address operations.
///
/// Covers script wire encoding/decoding failures, builder validation,
/// and CashAddr codec problems.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// A data push exceeds the maximum representable length (u32::MAX).
    #[error("data too big for a script push")]
    DataTooBig,

    /// A declared push length runs past the end of the script bytes.
    #[error("not enough data")]
    DataTooSmall,

    /// An opcode element carries a byte value in the push-length range
    /// (0x00-0x4e), which cannot survive a wire round-trip as an opcode.
    #[error("opcode 0x{0:02x} is reserved for push-length signaling")]
    ReservedPushOpcode(u8),

    /// Multi-signature output requested with a key count outside 2..=16.
    #[error("multisig requires 2 to 16 public keys, got {0}")]
    MultisigKeyCount(usize),

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// A character outside the CashAddr base32 alphabet.
    #[error("invalid address character '{0}'")]
    AddressChar(char),

    /// The CashAddr polynomial checksum did not verify to zero.
    #[error("address checksum failure")]
    AddressChecksum,

    /// Non-zero padding bits when converting 5-bit groups back to bytes.
    #[error("address padding bits are not zero")]
    AddressPadding,

    /// The address is too short to contain a checksum and payload.
    #[error("address too short")]
    AddressLength,
}

impl From<hex::FromHexError> for ScriptError {
    fn from(e: hex::FromHexError) -> Self {
        ScriptError::InvalidHex(e.to_string())
    }
}
