/// Elliptic curve cryptography on secp256k1.
///
/// Provides the signing primitive consumed by transaction signing:
/// private keys, public keys, and ECDSA signatures with DER encoding.
/// Curve arithmetic is delegated to `k256`.

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
