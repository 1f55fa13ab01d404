#![deny(missing_docs)]

//! cashkit - Bitcoin Cash transaction and address codec SDK.
//!
//! Re-exports all cashkit components for convenient single-crate usage.

pub use cashkit_primitives as primitives;
pub use cashkit_script as script;
pub use cashkit_transaction as transaction;
