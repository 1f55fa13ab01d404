/// cashkit SDK - Script model and address codec.
///
/// Provides the element-based Bitcoin Cash Script type, opcode
/// definitions, standard output script builders, and the CashAddr
/// base32 checksum codec.

pub mod script;
pub mod opcodes;
pub mod cashaddr;

mod error;
pub use error::ScriptError;
pub use script::{Script, ScriptElement};
