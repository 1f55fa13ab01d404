/// cashkit SDK - Transaction building, signing, and serialization.
///
/// Provides the Transaction type with inputs and outputs, strict wire
/// (de)serialization, signature digest computation for the legacy and
/// fork-id sighash algorithms, and scriptSig template signing.

pub mod transaction;
pub mod input;
pub mod output;
pub mod sighash;
pub mod template;

mod error;
pub use error::TransactionError;
pub use input::TxIn;
pub use output::TxOut;
pub use template::SigSlot;
pub use transaction::Transaction;
