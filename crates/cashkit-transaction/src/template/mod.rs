//! scriptSig templates with signature placeholders.
//!
//! A template is an ordered list of fixed script elements and signature
//! placeholders. Signing fills the placeholders left-to-right with the
//! produced signatures to form the input's unlocking script.

use cashkit_script::{Script, ScriptElement};

use crate::TransactionError;

/// One slot of a scriptSig template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SigSlot {
    /// A fixed opcode.
    Op(u8),
    /// A fixed data push.
    Data(Vec<u8>),
    /// A placeholder replaced by a signature during signing.
    Signature,
}

/// Build the standard P2PKH unlocking template: `<signature> <pubkey>`.
///
/// # Arguments
/// * `pub_key` - The serialized public key matching the spent output's
///   public key hash.
///
/// # Returns
/// The template slots.
pub fn p2pkh(pub_key: &[u8]) -> Vec<SigSlot> {
    vec![SigSlot::Signature, SigSlot::Data(pub_key.to_vec())]
}

/// Substitute signatures into a template, producing a scriptSig.
///
/// A single left-to-right pass replaces each placeholder with the next
/// supplied signature. Surplus signatures are left unused.
///
/// # Arguments
/// * `template` - The template slots.
/// * `signatures` - The signature byte strings, in placeholder order.
///
/// # Returns
/// The assembled `Script`, or `MissingSignature` when the placeholders
/// outnumber the signatures.
pub fn fill(template: &[SigSlot], signatures: &[Vec<u8>]) -> Result<Script, TransactionError> {
    let mut next_signature = signatures.iter();
    let mut elements = Vec::with_capacity(template.len());

    for slot in template {
        match slot {
            SigSlot::Op(op) => elements.push(ScriptElement::Op(*op)),
            SigSlot::Data(data) => elements.push(ScriptElement::Data(data.clone())),
            SigSlot::Signature => {
                let signature = next_signature
                    .next()
                    .ok_or(TransactionError::MissingSignature)?;
                elements.push(ScriptElement::Data(signature.clone()));
            }
        }
    }

    Ok(Script::from_elements(elements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashkit_script::opcodes::OP_0;

    #[test]
    fn test_fill_replaces_placeholders_in_order() {
        let template = vec![
            SigSlot::Signature,
            SigSlot::Data(vec![0xaa]),
            SigSlot::Signature,
        ];
        let signatures = vec![vec![0x01, 0x02], vec![0x03, 0x04]];
        let script = fill(&template, &signatures).unwrap();
        assert_eq!(
            script.elements(),
            &[
                ScriptElement::Data(vec![0x01, 0x02]),
                ScriptElement::Data(vec![0xaa]),
                ScriptElement::Data(vec![0x03, 0x04]),
            ]
        );
    }

    #[test]
    fn test_fill_errors_on_insufficient_signatures() {
        let template = vec![SigSlot::Signature, SigSlot::Signature];
        let signatures = vec![vec![0x01]];
        assert!(matches!(
            fill(&template, &signatures),
            Err(TransactionError::MissingSignature)
        ));
    }

    #[test]
    fn test_fill_ignores_surplus_signatures() {
        let template = vec![SigSlot::Signature];
        let signatures = vec![vec![0x01], vec![0x02]];
        let script = fill(&template, &signatures).unwrap();
        assert_eq!(script.elements(), &[ScriptElement::Data(vec![0x01])]);
    }

    #[test]
    fn test_fill_preserves_fixed_slots() {
        let template = vec![SigSlot::Op(OP_0), SigSlot::Data(vec![0xbb; 3])];
        let script = fill(&template, &[]).unwrap();
        assert_eq!(
            script.elements(),
            &[
                ScriptElement::Op(OP_0),
                ScriptElement::Data(vec![0xbb; 3]),
            ]
        );
    }

    #[test]
    fn test_p2pkh_template_shape() {
        let template = p2pkh(&[0x02; 33]);
        assert_eq!(
            template,
            vec![SigSlot::Signature, SigSlot::Data(vec![0x02; 33])]
        );
    }
}
