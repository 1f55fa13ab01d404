//! Signature digest computation for transaction signing.
//!
//! Computes the digest that is signed (or verified) to authorize
//! spending a transaction input, under two selectable algorithms: the
//! legacy ALL digest over a masked transaction copy, and the
//! replay-protected ALL|FORKID digest that also commits to the spent
//! amount.
//!
//! See <https://github.com/Bitcoin-UAHF/spec/blob/master/replay-protected-sighash.md>

use cashkit_primitives::hash::sha256d;
use cashkit_primitives::wire::{VarInt, WireWriter};
use cashkit_script::Script;

use crate::input::TxIn;
use crate::transaction::Transaction;
use crate::TransactionError;

// -----------------------------------------------------------------------
// Sighash type constants
// -----------------------------------------------------------------------

/// Sign all inputs and all outputs.
pub const SIGHASH_ALL: u32 = 0x01;

/// Replay-protection flag selecting the fork-id digest algorithm.
pub const SIGHASH_FORKID: u32 = 0x40;

/// The standard post-fork hash type: ALL | FORKID.
pub const SIGHASH_ALL_FORKID: u32 = SIGHASH_ALL | SIGHASH_FORKID;

// -----------------------------------------------------------------------
// Digest dispatch
// -----------------------------------------------------------------------

/// Compute the signature digest for one input of a transaction.
///
/// Dispatches on the hash type code: `SIGHASH_ALL` (0x01) selects the
/// legacy masked-transaction digest, `SIGHASH_ALL_FORKID` (0x41) the
/// replay-protected digest committing to the spent amount. Any other
/// code is rejected.
///
/// Calling this twice with identical arguments yields identical bytes;
/// the digest is a pure function of the transaction content.
///
/// # Arguments
/// * `tx` - The transaction being signed.
/// * `input_index` - Index of the input being signed.
/// * `script_pubkey` - The locking script of the output being spent.
/// * `sighash_type` - The hash type code.
/// * `amount` - The spent output's amount; required for ALL|FORKID.
///
/// # Returns
/// A 32-byte double-SHA256 digest.
pub fn signature_hash(
    tx: &Transaction,
    input_index: usize,
    script_pubkey: &Script,
    sighash_type: u32,
    amount: Option<u64>,
) -> Result<[u8; 32], TransactionError> {
    if input_index >= tx.inputs.len() {
        return Err(TransactionError::InputIndexOutOfRange {
            index: input_index,
            len: tx.inputs.len(),
        });
    }

    match sighash_type {
        SIGHASH_ALL => legacy_digest(tx, input_index, script_pubkey, sighash_type),
        SIGHASH_ALL_FORKID => {
            let amount = amount.ok_or(TransactionError::MissingAmount)?;
            fork_id_digest(tx, input_index, script_pubkey, sighash_type, amount)
        }
        other => Err(TransactionError::UnsupportedSighashType(other)),
    }
}

// -----------------------------------------------------------------------
// Legacy ALL digest
// -----------------------------------------------------------------------

/// Compute the legacy ALL digest over a masked transaction.
///
/// A new transaction value is built in which every input's scriptSig is
/// empty and the signed input's scriptSig is the spent output's locking
/// script (acting as the execution subscript). The masked transaction
/// is serialized, the 4-byte LE hash type appended, and the result
/// double-hashed. Building an explicit copy keeps the original and the
/// digest scratch value independent.
fn legacy_digest(
    tx: &Transaction,
    input_index: usize,
    script_pubkey: &Script,
    sighash_type: u32,
) -> Result<[u8; 32], TransactionError> {
    let masked_inputs = tx
        .inputs
        .iter()
        .enumerate()
        .map(|(i, input)| TxIn {
            prev_out_hash: input.prev_out_hash,
            prev_out_index: input.prev_out_index,
            script_sig: if i == input_index {
                script_pubkey.clone()
            } else {
                Script::new()
            },
            sequence: input.sequence,
        })
        .collect();

    let masked = Transaction {
        version: tx.version,
        inputs: masked_inputs,
        outputs: tx.outputs.clone(),
        lock_time: tx.lock_time,
    };

    let mut body = masked.to_bytes()?;
    body.extend_from_slice(&sighash_type.to_le_bytes());
    Ok(sha256d(&body))
}

// -----------------------------------------------------------------------
// Fork-id ALL digest
// -----------------------------------------------------------------------

/// Compute the replay-protected ALL|FORKID digest.
///
/// The digest preimage is:
/// 1. version (4 bytes LE)
/// 2. sha256d of all input outpoints
/// 3. sha256d of all input sequence numbers
/// 4. outpoint of the signed input (hash + index)
/// 5. VarInt-length-prefixed locking script of the spent output
/// 6. amount of the spent output (8 bytes LE)
/// 7. sequence of the signed input (4 bytes LE)
/// 8. sha256d of all serialized outputs
/// 9. lock time (4 bytes LE)
/// 10. hash type (4 bytes LE)
fn fork_id_digest(
    tx: &Transaction,
    input_index: usize,
    script_pubkey: &Script,
    sighash_type: u32,
    amount: u64,
) -> Result<[u8; 32], TransactionError> {
    let input = &tx.inputs[input_index];
    let script_bytes = script_pubkey.to_bytes()?;

    let mut writer = WireWriter::with_capacity(256);

    writer.write_u32_le(tx.version);
    writer.write_bytes(&prevouts_hash(tx));
    writer.write_bytes(&sequence_hash(tx));

    writer.write_bytes(&input.prev_out_hash);
    writer.write_u32_le(input.prev_out_index);

    writer.write_varint(VarInt::from(script_bytes.len()));
    writer.write_bytes(&script_bytes);

    writer.write_u64_le(amount);
    writer.write_u32_le(input.sequence);

    writer.write_bytes(&outputs_hash(tx)?);
    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(sighash_type);

    Ok(sha256d(writer.as_bytes()))
}

/// Double-SHA256 of all input outpoints concatenated.
///
/// Each outpoint is the previous output hash (32 bytes) followed by the
/// previous output index (4 bytes LE).
fn prevouts_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = WireWriter::with_capacity(tx.inputs.len() * 36);
    for input in &tx.inputs {
        writer.write_bytes(&input.prev_out_hash);
        writer.write_u32_le(input.prev_out_index);
    }
    sha256d(writer.as_bytes())
}

/// Double-SHA256 of all input sequence numbers concatenated (4 bytes LE each).
fn sequence_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = WireWriter::with_capacity(tx.inputs.len() * 4);
    for input in &tx.inputs {
        writer.write_u32_le(input.sequence);
    }
    sha256d(writer.as_bytes())
}

/// Double-SHA256 of all serialized outputs concatenated.
fn outputs_hash(tx: &Transaction) -> Result<[u8; 32], TransactionError> {
    let mut writer = WireWriter::new();
    for output in &tx.outputs {
        output.write_to(&mut writer)?;
    }
    Ok(sha256d(writer.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::TxOut;

    fn sample_tx() -> Transaction {
        let mut input = TxIn::new([0x11; 32], 0);
        input.sequence = 0xfffffffe;
        let output = TxOut::new(90_000, Script::standard_pubkey(&[0x22; 20]));
        Transaction::new(vec![input], vec![output], 0)
    }

    fn spent_script() -> Script {
        Script::standard_pubkey(&[0x33; 20])
    }

    #[test]
    fn test_fork_id_digest_is_deterministic() {
        let tx = sample_tx();
        let a = signature_hash(&tx, 0, &spent_script(), SIGHASH_ALL_FORKID, Some(100_000))
            .unwrap();
        let b = signature_hash(&tx, 0, &spent_script(), SIGHASH_ALL_FORKID, Some(100_000))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fork_id_digest_commits_to_amount() {
        let tx = sample_tx();
        let a = signature_hash(&tx, 0, &spent_script(), SIGHASH_ALL_FORKID, Some(100_000))
            .unwrap();
        let b = signature_hash(&tx, 0, &spent_script(), SIGHASH_ALL_FORKID, Some(100_001))
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_fork_id_requires_amount() {
        let tx = sample_tx();
        let result = signature_hash(&tx, 0, &spent_script(), SIGHASH_ALL_FORKID, None);
        assert!(matches!(result, Err(TransactionError::MissingAmount)));
    }

    #[test]
    fn test_unsupported_hash_types_rejected() {
        let tx = sample_tx();
        for bad in [0x00u32, 0x02, 0x03, 0x40, 0x42, 0x81, 0xc1] {
            let result = signature_hash(&tx, 0, &spent_script(), bad, Some(1));
            assert!(
                matches!(result, Err(TransactionError::UnsupportedSighashType(t)) if t == bad),
                "hash type {:#x} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_input_index_out_of_range() {
        let tx = sample_tx();
        let result = signature_hash(&tx, 1, &spent_script(), SIGHASH_ALL_FORKID, Some(1));
        assert!(matches!(
            result,
            Err(TransactionError::InputIndexOutOfRange { index: 1, len: 1 })
        ));
    }

    /// The legacy digest equals sha256d over the independently
    /// constructed masked serialization plus the hash type.
    #[test]
    fn test_legacy_digest_matches_masked_serialization() {
        let mut input_a = TxIn::new([0x11; 32], 0);
        input_a.script_sig = Script::data_pubkey(b"existing sig");
        let input_b = TxIn::new([0x44; 32], 7);
        let output = TxOut::new(50_000, Script::standard_pubkey(&[0x22; 20]));
        let tx = Transaction::new(vec![input_a, input_b], vec![output.clone()], 9);

        let digest = signature_hash(&tx, 0, &spent_script(), SIGHASH_ALL, None).unwrap();

        // Assemble the masked transaction by hand: input 0 carries the
        // spent locking script, input 1 an empty script.
        let mut masked_a = TxIn::new([0x11; 32], 0);
        masked_a.script_sig = spent_script();
        let masked_b = TxIn::new([0x44; 32], 7);
        let masked = Transaction::new(vec![masked_a, masked_b], vec![output], 9);

        let mut expected = masked.to_bytes().unwrap();
        expected.extend_from_slice(&SIGHASH_ALL.to_le_bytes());
        assert_eq!(digest, cashkit_primitives::hash::sha256d(&expected));
    }

    /// The legacy digest never mutates the transaction it reads.
    #[test]
    fn test_legacy_digest_leaves_original_untouched() {
        let mut input = TxIn::new([0x11; 32], 0);
        input.script_sig = Script::data_pubkey(b"signature material");
        let tx = Transaction::new(
            vec![input],
            vec![TxOut::new(1, Script::new())],
            0,
        );
        let before = tx.clone();
        signature_hash(&tx, 0, &spent_script(), SIGHASH_ALL, None).unwrap();
        assert_eq!(tx, before);
    }

    /// The fork-id digest equals sha256d over the independently
    /// assembled preimage.
    #[test]
    fn test_fork_id_digest_matches_manual_preimage() {
        use cashkit_primitives::hash::sha256d;

        let tx = sample_tx();
        let script = spent_script();
        let amount = 100_000u64;

        let digest =
            signature_hash(&tx, 0, &script, SIGHASH_ALL_FORKID, Some(amount)).unwrap();

        let mut outpoints = Vec::new();
        outpoints.extend_from_slice(&[0x11; 32]);
        outpoints.extend_from_slice(&0u32.to_le_bytes());

        let script_bytes = script.to_bytes().unwrap();
        let output_bytes = tx.outputs[0].to_bytes().unwrap();

        let mut preimage = Vec::new();
        preimage.extend_from_slice(&2u32.to_le_bytes());
        preimage.extend_from_slice(&sha256d(&outpoints));
        preimage.extend_from_slice(&sha256d(&0xfffffffeu32.to_le_bytes()));
        preimage.extend_from_slice(&[0x11; 32]);
        preimage.extend_from_slice(&0u32.to_le_bytes());
        preimage.push(script_bytes.len() as u8);
        preimage.extend_from_slice(&script_bytes);
        preimage.extend_from_slice(&amount.to_le_bytes());
        preimage.extend_from_slice(&0xfffffffeu32.to_le_bytes());
        preimage.extend_from_slice(&sha256d(&output_bytes));
        preimage.extend_from_slice(&0u32.to_le_bytes());
        preimage.extend_from_slice(&SIGHASH_ALL_FORKID.to_le_bytes());

        assert_eq!(digest, sha256d(&preimage));
    }
}
