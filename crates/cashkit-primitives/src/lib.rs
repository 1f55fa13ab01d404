/// cashkit SDK - Hash primitives, wire codec helpers, and keys.
///
/// This crate provides the foundational building blocks for the cashkit SDK:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - Transaction hash type with display-order hex conversion
/// - Variable-length integer encoding and wire reader/writer cursors
/// - Elliptic curve cryptography (secp256k1 keys and ECDSA signatures)

pub mod hash;
pub mod txhash;
pub mod wire;
pub mod ec;

mod error;
pub use error::PrimitivesError;
