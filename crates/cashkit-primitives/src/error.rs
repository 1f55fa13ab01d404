/// Unified error type for all primitives operations.
///
/// Covers errors from wire decoding, hashing, and EC key management.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    /// A read ran past the end of the input buffer. Raised by the wire
    /// reader and by VarInt decoding when a multi-byte length marker
    /// demands more bytes than remain.
    #[error("unexpected end of data")]
    UnexpectedEof,

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
