/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The version field of a serialized transaction is not 2.
    #[error("unsupported transaction version {0}")]
    UnsupportedVersion(u32),

    /// After the output vector, the remaining byte count is not exactly
    /// the 4-byte lock time. Trailing or missing bytes would make
    /// signature digests non-reproducible.
    #[error("incorrect data length: {0} bytes remain where the 4-byte lock time belongs")]
    TrailingLength(usize),

    /// An error occurred reading a wire field.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// The sighash type code is not ALL (0x01) or ALL|FORKID (0x41).
    #[error("sighash type 0x{0:02x} not supported")]
    UnsupportedSighashType(u32),

    /// The fork-id digest was requested without the spent output amount.
    #[error("input amount required for fork-id sighash")]
    MissingAmount,

    /// An input index is outside the transaction's input vector.
    #[error("input index {index} out of range (tx has {len} inputs)")]
    InputIndexOutOfRange { index: usize, len: usize },

    /// A scriptSig template has more signature placeholders than
    /// signatures were supplied.
    #[error("template has more signature placeholders than signatures")]
    MissingSignature,

    /// An underlying script error (forwarded from `cashkit-script`).
    #[error("script error: {0}")]
    Script(#[from] cashkit_script::ScriptError),

    /// An underlying primitives error (forwarded from `cashkit-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] cashkit_primitives::PrimitivesError),
}
