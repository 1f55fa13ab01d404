//! ECDSA signature with DER serialization.
//!
//! Signatures are produced with RFC6979 deterministic nonces and
//! low-S normalized per BIP-0062 before DER encoding.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa;

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// The secp256k1 curve order N.
const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

/// Half of the secp256k1 curve order (N/2), used for low-S normalization.
const HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B,
    0x20, 0xA0,
];

/// An ECDSA signature with R and S components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The R component of the signature (32 bytes, big-endian).
    r: [u8; 32],
    /// The S component of the signature (32 bytes, big-endian).
    s: [u8; 32],
}

impl Signature {
    /// Create a signature from raw R and S 32-byte arrays.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    /// Sign a message digest with the given private key.
    ///
    /// Uses RFC6979 deterministic nonces; the result is low-S
    /// normalized per BIP-0062.
    ///
    /// # Arguments
    /// * `digest` - The message digest to sign (32 bytes; shorter input
    ///   is left-padded, longer input truncated).
    /// * `priv_key` - The private key to sign with.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if signing fails.
    pub fn sign(digest: &[u8], priv_key: &PrivateKey) -> Result<Self, PrimitivesError> {
        let padded = normalize_digest(digest);

        let (k256_sig, _recovery_id) = priv_key
            .signing_key()
            .sign_prehash_recoverable(&padded)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;

        let (r_bytes, s_bytes) = k256_sig.split_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&r_bytes);
        s.copy_from_slice(&s_bytes);

        if is_greater_than(&s, &HALF_ORDER) {
            s = subtract_from_order(&s);
        }

        Ok(Signature { r, s })
    }

    /// Verify this signature against a message digest and public key.
    ///
    /// # Arguments
    /// * `digest` - The message digest that was signed.
    /// * `pub_key` - The public key to verify against.
    ///
    /// # Returns
    /// `true` if the signature is valid, `false` otherwise.
    pub fn verify(&self, digest: &[u8], pub_key: &PublicKey) -> bool {
        let k256_sig = match ecdsa::Signature::from_scalars(
            k256::FieldBytes::from(self.r),
            k256::FieldBytes::from(self.s),
        ) {
            Ok(sig) => sig,
            Err(_) => return false,
        };

        let padded = normalize_digest(digest);
        pub_key
            .verifying_key()
            .verify_prehash(&padded, &k256_sig)
            .is_ok()
    }

    /// Parse a DER-encoded ECDSA signature.
    ///
    /// Expected format: `0x30 <len> 0x02 <r_len> <r> 0x02 <s_len> <s>`
    ///
    /// # Arguments
    /// * `bytes` - DER-encoded signature bytes.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if the encoding is malformed
    /// or R/S are out of range.
    pub fn from_der(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() < 8 {
            return Err(PrimitivesError::InvalidSignature(
                "malformed signature: too short".to_string(),
            ));
        }
        if bytes[0] != 0x30 {
            return Err(PrimitivesError::InvalidSignature(
                "malformed signature: no header magic".to_string(),
            ));
        }
        let sig_len = bytes[1] as usize;
        if sig_len + 2 > bytes.len() || sig_len + 2 < 8 {
            return Err(PrimitivesError::InvalidSignature(
                "malformed signature: bad length".to_string(),
            ));
        }
        let data = &bytes[..sig_len + 2];
        let mut idx = 2;

        if data[idx] != 0x02 {
            return Err(PrimitivesError::InvalidSignature(
                "malformed signature: no 1st int marker".to_string(),
            ));
        }
        idx += 1;
        let r_len = data[idx] as usize;
        idx += 1;
        if r_len == 0 || idx + r_len > data.len() - 3 {
            return Err(PrimitivesError::InvalidSignature(
                "malformed signature: bogus R length".to_string(),
            ));
        }
        let r_bytes = &data[idx..idx + r_len];
        idx += r_len;

        if data[idx] != 0x02 {
            return Err(PrimitivesError::InvalidSignature(
                "malformed signature: no 2nd int marker".to_string(),
            ));
        }
        idx += 1;
        let s_len = data[idx] as usize;
        idx += 1;
        if s_len == 0 || idx + s_len > data.len() {
            return Err(PrimitivesError::InvalidSignature(
                "malformed signature: bogus S length".to_string(),
            ));
        }
        let s_bytes = &data[idx..idx + s_len];

        let r = to_32_bytes(r_bytes)?;
        let s = to_32_bytes(s_bytes)?;

        if is_zero(&r) || is_zero(&s) {
            return Err(PrimitivesError::InvalidSignature(
                "signature R or S is zero".to_string(),
            ));
        }
        if !is_less_than(&r, &CURVE_ORDER) || !is_less_than(&s, &CURVE_ORDER) {
            return Err(PrimitivesError::InvalidSignature(
                "signature R or S is >= curve.N".to_string(),
            ));
        }

        Ok(Signature { r, s })
    }

    /// Serialize the signature in DER format with low-S normalization.
    ///
    /// Output format: `0x30 <len> 0x02 <r_len> <r> 0x02 <s_len> <s>`.
    ///
    /// # Returns
    /// A byte vector containing the DER-encoded signature.
    pub fn to_der(&self) -> Vec<u8> {
        let s = if is_greater_than(&self.s, &HALF_ORDER) {
            subtract_from_order(&self.s)
        } else {
            self.s
        };

        let rb = canonicalize_int(&self.r);
        let sb = canonicalize_int(&s);

        let total_len = 6 + rb.len() + sb.len();
        let mut out = Vec::with_capacity(total_len);
        out.push(0x30);
        out.push((total_len - 2) as u8);
        out.push(0x02);
        out.push(rb.len() as u8);
        out.extend_from_slice(&rb);
        out.push(0x02);
        out.push(sb.len() as u8);
        out.extend_from_slice(&sb);
        out
    }
}

/// Normalize an arbitrary-length digest to exactly 32 bytes.
///
/// Shorter input is left-padded with zeros, longer input truncated.
fn normalize_digest(digest: &[u8]) -> [u8; 32] {
    let mut padded = [0u8; 32];
    if digest.len() >= 32 {
        padded.copy_from_slice(&digest[..32]);
    } else {
        padded[32 - digest.len()..].copy_from_slice(digest);
    }
    padded
}

/// Canonicalize an integer for DER encoding.
///
/// Strips leading zeros from the big-endian representation and adds a
/// 0x00 padding byte if the high bit is set.
fn canonicalize_int(val: &[u8; 32]) -> Vec<u8> {
    let mut start = 0;
    while start < 31 && val[start] == 0 {
        start += 1;
    }
    let trimmed = &val[start..];

    if trimmed[0] & 0x80 != 0 {
        let mut out = Vec::with_capacity(trimmed.len() + 1);
        out.push(0x00);
        out.extend_from_slice(trimmed);
        out
    } else {
        trimmed.to_vec()
    }
}

/// Convert a variable-length big-endian byte slice to a fixed 32-byte array.
fn to_32_bytes(bytes: &[u8]) -> Result<[u8; 32], PrimitivesError> {
    let mut trimmed = bytes;
    while trimmed.len() > 1 && trimmed[0] == 0 {
        trimmed = &trimmed[1..];
    }
    if trimmed.len() > 32 {
        return Err(PrimitivesError::InvalidSignature(
            "integer value too large for 32 bytes".to_string(),
        ));
    }
    let mut out = [0u8; 32];
    out[32 - trimmed.len()..].copy_from_slice(trimmed);
    Ok(out)
}

/// Check if a 32-byte big-endian integer is zero.
fn is_zero(val: &[u8; 32]) -> bool {
    val.iter().all(|&b| b == 0)
}

/// Compare two 32-byte big-endian integers: a < b.
fn is_less_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    for i in 0..32 {
        if a[i] < b[i] {
            return true;
        }
        if a[i] > b[i] {
            return false;
        }
    }
    false
}

/// Compare two 32-byte big-endian integers: a > b.
fn is_greater_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    for i in 0..32 {
        if a[i] > b[i] {
            return true;
        }
        if a[i] < b[i] {
            return false;
        }
    }
    false
}

/// Compute N - s over big-endian 32-byte integers.
fn subtract_from_order(s: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut borrow: i32 = 0;
    for i in (0..32).rev() {
        let diff = CURVE_ORDER[i] as i32 - s[i] as i32 - borrow;
        if diff < 0 {
            out[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            out[i] = diff as u8;
            borrow = 0;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256;

    fn test_key() -> PrivateKey {
        PrivateKey::from_hex("0000000000000000000000000000000000000000000000000000000000000001")
            .unwrap()
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let key = test_key();
        let digest = sha256(b"cashkit signature test");
        let sig = key.sign(&digest).unwrap();
        assert!(key.pub_key().verify(&digest, &sig));
    }

    #[test]
    fn test_verify_rejects_wrong_digest() {
        let key = test_key();
        let sig = key.sign(&sha256(b"message one")).unwrap();
        assert!(!key.pub_key().verify(&sha256(b"message two"), &sig));
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let key = test_key();
        let other = PrivateKey::from_hex(
            "0000000000000000000000000000000000000000000000000000000000000002",
        )
        .unwrap();
        let digest = sha256(b"signed by key one");
        let sig = key.sign(&digest).unwrap();
        assert!(!other.pub_key().verify(&digest, &sig));
    }

    #[test]
    fn test_deterministic_signatures() {
        let key = test_key();
        let digest = sha256(b"rfc6979 determinism");
        let a = key.sign(&digest).unwrap();
        let b = key.sign(&digest).unwrap();
        assert_eq!(a.to_der(), b.to_der());
    }

    #[test]
    fn test_der_roundtrip() {
        let key = test_key();
        let digest = sha256(b"der roundtrip");
        let sig = key.sign(&digest).unwrap();
        let der = sig.to_der();
        assert_eq!(der[0], 0x30);
        let parsed = Signature::from_der(&der).unwrap();
        assert_eq!(parsed, sig);
        assert!(key.pub_key().verify(&digest, &parsed));
    }

    #[test]
    fn test_from_der_rejects_garbage() {
        assert!(Signature::from_der(&[]).is_err());
        assert!(Signature::from_der(&[0x30, 0x02, 0x01, 0x00]).is_err());
        assert!(Signature::from_der(&[0xff; 16]).is_err());
    }

    #[test]
    fn test_low_s_in_der() {
        // A high-S signature must be flipped below N/2 when DER encoded.
        let high_s = Signature::new([0x01; 32], CURVE_ORDER_MINUS_ONE);
        let der = high_s.to_der();
        let parsed = Signature::from_der(&der).unwrap();
        // N - (N - 1) = 1
        let mut one = [0u8; 32];
        one[31] = 1;
        assert_eq!(parsed, Signature::new([0x01; 32], one));
    }

    const CURVE_ORDER_MINUS_ONE: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C,
        0xD0, 0x36, 0x41, 0x40,
    ];
}
