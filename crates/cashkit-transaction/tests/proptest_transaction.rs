use proptest::prelude::*;

use cashkit_script::{Script, ScriptElement};
use cashkit_transaction::sighash::SIGHASH_ALL_FORKID;
use cashkit_transaction::{Transaction, TxIn, TxOut};

/// Strategy for a well-formed script: opcodes above the push range
/// mixed with data pushes.
fn arb_script() -> impl Strategy<Value = Script> {
    let element = prop_oneof![
        (0x4fu8..=0xff).prop_map(ScriptElement::Op),
        prop::collection::vec(any::<u8>(), 0..48).prop_map(ScriptElement::Data),
    ];
    prop::collection::vec(element, 0..8).prop_map(Script::from_elements)
}

fn arb_input() -> impl Strategy<Value = TxIn> {
    (
        prop::array::uniform32(any::<u8>()),
        any::<u32>(),
        arb_script(),
        any::<u32>(),
    )
        .prop_map(|(hash, index, script_sig, sequence)| {
            let mut input = TxIn::new(hash, index);
            input.script_sig = script_sig;
            input.sequence = sequence;
            input
        })
}

fn arb_output() -> impl Strategy<Value = TxOut> {
    (any::<u64>(), arb_script()).prop_map(|(amount, script)| TxOut::new(amount, script))
}

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (
        prop::collection::vec(arb_input(), 0..4),
        prop::collection::vec(arb_output(), 0..4),
        any::<u32>(),
    )
        .prop_map(|(inputs, outputs, lock_time)| Transaction::new(inputs, outputs, lock_time))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn transaction_serialize_deserialize_roundtrip(tx in arb_transaction()) {
        let bytes = tx.to_bytes().unwrap();
        let parsed = Transaction::from_bytes(&bytes).unwrap();
        prop_assert_eq!(&parsed, &tx);
        prop_assert_eq!(parsed.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn transaction_hex_roundtrip(tx in arb_transaction()) {
        let hex_str = tx.to_hex().unwrap();
        let parsed = Transaction::from_hex(&hex_str).unwrap();
        prop_assert_eq!(parsed.to_hex().unwrap(), hex_str);
    }

    #[test]
    fn trailing_bytes_always_rejected(tx in arb_transaction(), extra in 1usize..8) {
        let mut bytes = tx.to_bytes().unwrap();
        bytes.extend(std::iter::repeat(0u8).take(extra));
        prop_assert!(Transaction::from_bytes(&bytes).is_err());
    }

    #[test]
    fn fork_id_digest_deterministic(
        tx in arb_transaction(),
        amount in any::<u64>(),
        spent_hash in prop::array::uniform32(any::<u8>())
    ) {
        if tx.inputs.is_empty() {
            return Ok(());
        }
        let spent_script = Script::standard_pubkey(&spent_hash[..20]);
        let a = tx.signature_hash(0, &spent_script, SIGHASH_ALL_FORKID, Some(amount)).unwrap();
        let b = tx.signature_hash(0, &spent_script, SIGHASH_ALL_FORKID, Some(amount)).unwrap();
        prop_assert_eq!(a, b);
    }
}
