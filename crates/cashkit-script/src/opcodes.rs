//! Bitcoin Cash script opcode constants.
//!
//! Byte values 0x00-0x4e are push-length signaling (direct pushes and
//! the OP_PUSHDATA markers); everything above is an executable opcode.
//! Only the opcodes used by the standard output templates and their
//! neighbors are named here.

/// Push an empty byte string (also known as OP_FALSE).
pub const OP_0: u8 = 0x00;
/// The next byte is the push length (1-255 bytes).
pub const OP_PUSHDATA1: u8 = 0x4c;
/// The next 2 bytes (LE) are the push length.
pub const OP_PUSHDATA2: u8 = 0x4d;
/// The next 4 bytes (LE) are the push length.
pub const OP_PUSHDATA4: u8 = 0x4e;

/// Push the number 1 onto the stack.
pub const OP_1: u8 = 0x51;
/// Push the number 2 onto the stack. Base opcode for OP_N small integers.
pub const OP_2: u8 = 0x52;
/// Push the number 16 onto the stack.
pub const OP_16: u8 = 0x60;

/// Mark the output as unspendable; the remainder carries data.
pub const OP_RETURN: u8 = 0x6a;
/// Duplicate the top stack item.
pub const OP_DUP: u8 = 0x76;
/// Push 1 if the top two items are equal, 0 otherwise.
pub const OP_EQUAL: u8 = 0x87;
/// OP_EQUAL followed by OP_VERIFY.
pub const OP_EQUALVERIFY: u8 = 0x88;
/// Hash the top item with SHA-256.
pub const OP_SHA256: u8 = 0xa8;
/// Hash the top item with SHA-256 then RIPEMD-160.
pub const OP_HASH160: u8 = 0xa9;
/// Verify an ECDSA signature against a public key.
pub const OP_CHECKSIG: u8 = 0xac;
/// OP_CHECKSIG followed by OP_VERIFY.
pub const OP_CHECKSIGVERIFY: u8 = 0xad;
/// Verify M-of-N ECDSA signatures.
pub const OP_CHECKMULTISIG: u8 = 0xae;

/// Look up the canonical name of an opcode byte.
///
/// # Arguments
/// * `op` - The opcode byte.
///
/// # Returns
/// `Some(name)` for the opcodes named in this module, `None` otherwise.
pub fn opcode_name(op: u8) -> Option<&'static str> {
    match op {
        OP_0 => Some("OP_0"),
        OP_PUSHDATA1 => Some("OP_PUSHDATA1"),
        OP_PUSHDATA2 => Some("OP_PUSHDATA2"),
        OP_PUSHDATA4 => Some("OP_PUSHDATA4"),
        OP_1 => Some("OP_1"),
        OP_2 => Some("OP_2"),
        0x53 => Some("OP_3"),
        0x54 => Some("OP_4"),
        0x55 => Some("OP_5"),
        0x56 => Some("OP_6"),
        0x57 => Some("OP_7"),
        0x58 => Some("OP_8"),
        0x59 => Some("OP_9"),
        0x5a => Some("OP_10"),
        0x5b => Some("OP_11"),
        0x5c => Some("OP_12"),
        0x5d => Some("OP_13"),
        0x5e => Some("OP_14"),
        0x5f => Some("OP_15"),
        OP_16 => Some("OP_16"),
        OP_RETURN => Some("OP_RETURN"),
        OP_DUP => Some("OP_DUP"),
        OP_EQUAL => Some("OP_EQUAL"),
        OP_EQUALVERIFY => Some("OP_EQUALVERIFY"),
        OP_SHA256 => Some("OP_SHA256"),
        OP_HASH160 => Some("OP_HASH160"),
        OP_CHECKSIG => Some("OP_CHECKSIG"),
        OP_CHECKSIGVERIFY => Some("OP_CHECKSIGVERIFY"),
        OP_CHECKMULTISIG => Some("OP_CHECKMULTISIG"),
        _ => None,
    }
}

/// Check whether a byte is a small-integer push opcode (OP_1..OP_16).
///
/// # Arguments
/// * `op` - The opcode byte.
///
/// # Returns
/// `true` for OP_1 through OP_16.
pub fn is_small_int_op(op: u8) -> bool {
    (OP_1..=OP_16).contains(&op)
}
