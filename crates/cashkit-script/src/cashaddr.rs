//! CashAddr base32 checksum codec.
//!
//! Encodes a version byte plus hash payload into the checksummed,
//! human-typable address format used by Bitcoin Cash: a 5-bit alphabet
//! with a 40-bit BCH-style polynomial checksum. The `bitcoincash:`
//! family prefix conventionally precedes an address but is not part of
//! the encoded string; it only seeds the checksum computation.
//!
//! See <https://bch.info/en/specifications>

use cashkit_primitives::hash::hash160;

use crate::ScriptError;

/// The address family tag. Folded into the checksum but never emitted.
const ADDRESS_PREFIX: &str = "bitcoincash";

/// Number of 5-bit checksum symbols (40 bits / 5 bits).
const CHECKSUM_LEN: usize = 8;

/// The 32-character alphabet mapping 5-bit values to characters.
const BASE32_ALPHABET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Address version for pay-to-public-key-hash payloads.
pub const P2PKH_VERSION: u8 = 0;

/// Address version for pay-to-script-hash payloads.
pub const P2SH_VERSION: u8 = 8;

/// Compute the PolyMod checksum over a symbol sequence.
///
/// The 40-bit state is held in a masked u64, initialized to 1; the
/// final checksum is the state XOR 1. A valid checksummed sequence
/// (prefix plus payload plus checksum symbols) yields 0.
///
/// # Arguments
/// * `symbols` - The 5-bit symbols to checksum.
///
/// # Returns
/// The 40-bit checksum value.
fn poly_mod<I>(symbols: I) -> u64
where
    I: IntoIterator<Item = u8>,
{
    let mut c: u64 = 1;
    for d in symbols {
        let c0 = ((c >> 35) & 0xff) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ d as u64;
        if c0 & 0x01 != 0 {
            c ^= 0x98_f2bc_8e61;
        }
        if c0 & 0x02 != 0 {
            c ^= 0x79_b76d_99e2;
        }
        if c0 & 0x04 != 0 {
            c ^= 0xf3_3e5f_b3c4;
        }
        if c0 & 0x08 != 0 {
            c ^= 0xae_2eab_e2a8;
        }
        if c0 & 0x10 != 0 {
            c ^= 0x1e_4f43_e470;
        }
    }
    c ^ 1
}

/// The checksum prefix derived from the address family tag: each
/// character masked to its low 5 bits, followed by a zero separator.
fn checksum_prefix() -> impl Iterator<Item = u8> {
    ADDRESS_PREFIX
        .bytes()
        .map(|c| c & 31)
        .chain(std::iter::once(0))
}

/// Convert bytes to 5-bit symbols.
///
/// The byte string is treated as a big-endian bit stream whose length
/// is padded up to a multiple of 5 with zero bits in the low positions;
/// symbols are emitted most-significant-first. The inverse conversion
/// checks that exactly these padding bits are zero.
///
/// # Arguments
/// * `data` - The bytes to convert.
///
/// # Returns
/// The 5-bit symbols.
fn bytes_to_base32(data: &[u8]) -> Vec<u8> {
    let total_bits = data.len() * 8;
    let num_symbols = (total_bits + 4) / 5;

    let mut symbols = Vec::with_capacity(num_symbols);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for &b in data {
        acc = (acc << 8) | b as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            symbols.push(((acc >> bits) & 31) as u8);
        }
    }
    if bits > 0 {
        symbols.push(((acc << (5 - bits)) & 31) as u8);
    }
    symbols
}

/// Convert 5-bit symbols back to bytes.
///
/// Packs the symbols into a big-endian integer and emits whole bytes;
/// the low `total_bits mod 8` bits are padding and must be zero.
///
/// # Arguments
/// * `symbols` - The 5-bit symbols to convert.
///
/// # Returns
/// The packed bytes, or `AddressPadding` if any padding bit is set.
fn base32_to_bytes(symbols: &[u8]) -> Result<Vec<u8>, ScriptError> {
    let total_bits = symbols.len() * 5;
    let mut bytes = Vec::with_capacity(total_bits / 8);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for &s in symbols {
        acc = (acc << 5) | s as u32;
        bits += 5;
        while bits >= 8 {
            bits -= 8;
            bytes.push(((acc >> bits) & 0xff) as u8);
        }
    }
    if bits > 0 && acc & ((1 << bits) - 1) != 0 {
        return Err(ScriptError::AddressPadding);
    }
    Ok(bytes)
}

/// Encode a version byte and hash payload as a CashAddr string.
///
/// The version byte is prepended to the hash, the result converted to
/// 5-bit symbols, and the 8-symbol checksum appended. The produced
/// string uses only the lower-case alphabet; the `bitcoincash:` family
/// prefix is not included.
///
/// # Arguments
/// * `version` - The address version (0 for P2PKH, 8 for P2SH).
/// * `hash` - The hash payload bytes.
///
/// # Returns
/// The encoded address string.
pub fn encode(version: u8, hash: &[u8]) -> String {
    let mut payload = Vec::with_capacity(1 + hash.len());
    payload.push(version);
    payload.extend_from_slice(hash);

    let mut symbols = bytes_to_base32(&payload);

    let checksum = poly_mod(
        checksum_prefix()
            .chain(symbols.iter().copied())
            .chain(std::iter::repeat(0).take(CHECKSUM_LEN)),
    );
    for i in (0..CHECKSUM_LEN).rev() {
        symbols.push(((checksum >> (5 * i)) & 31) as u8);
    }

    symbols
        .iter()
        .map(|&s| BASE32_ALPHABET[s as usize] as char)
        .collect()
}

/// Decode a CashAddr string into its version byte and hash payload.
///
/// Accepts the bare encoded portion (no family prefix), case
/// insensitively. The polynomial checksum over the prefix-derived
/// symbols plus the address symbols must verify to zero.
///
/// # Arguments
/// * `address` - The address string to decode.
///
/// # Returns
/// `Ok((version, hash))` on success; `AddressChar` for a character
/// outside the alphabet, `AddressChecksum` on checksum failure,
/// `AddressPadding` for non-zero padding bits, `AddressLength` when
/// the string cannot hold a checksum and payload.
pub fn decode(address: &str) -> Result<(u8, Vec<u8>), ScriptError> {
    let mut symbols = Vec::with_capacity(address.len());
    for c in address.chars() {
        let folded = c.to_ascii_lowercase();
        let index = BASE32_ALPHABET
            .iter()
            .position(|&a| a as char == folded)
            .ok_or(ScriptError::AddressChar(c))?;
        symbols.push(index as u8);
    }

    if symbols.len() <= CHECKSUM_LEN {
        return Err(ScriptError::AddressLength);
    }

    let checksum = poly_mod(checksum_prefix().chain(symbols.iter().copied()));
    if checksum != 0 {
        return Err(ScriptError::AddressChecksum);
    }

    let payload = base32_to_bytes(&symbols[..symbols.len() - CHECKSUM_LEN])?;
    if payload.is_empty() {
        return Err(ScriptError::AddressLength);
    }

    Ok((payload[0], payload[1..].to_vec()))
}

/// Encode the P2PKH address of a public key.
///
/// Computes Hash160 of the serialized public key and encodes it with
/// the P2PKH version byte.
///
/// # Arguments
/// * `pub_key` - The serialized (compressed or uncompressed) public key.
///
/// # Returns
/// The encoded address string.
pub fn encode_pubkey(pub_key: &[u8]) -> String {
    encode(P2PKH_VERSION, &hash160(pub_key))
}

#[cfg(test)]
mod tests {
    //! Tests for the CashAddr codec: published vectors, round-trips,
    //! corruption detection, and padding/alphabet error paths.

    use super::*;

    /// Hash160 from the published CashAddr P2PKH test vector.
    const VECTOR_HASH: &str = "76a04053bda0a88bda5177b86a15c3b29f559873";

    /// The published address for `VECTOR_HASH` with version 0 under the
    /// `bitcoincash` family prefix.
    const VECTOR_ADDRESS: &str = "qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a";

    #[test]
    fn test_encode_published_vector() {
        let hash = hex::decode(VECTOR_HASH).unwrap();
        assert_eq!(encode(P2PKH_VERSION, &hash), VECTOR_ADDRESS);
    }

    #[test]
    fn test_decode_published_vector() {
        let (version, hash) = decode(VECTOR_ADDRESS).unwrap();
        assert_eq!(version, P2PKH_VERSION);
        assert_eq!(hex::encode(hash), VECTOR_HASH);
    }

    #[test]
    fn test_decode_is_case_insensitive() {
        let upper = VECTOR_ADDRESS.to_uppercase();
        let (version, hash) = decode(&upper).unwrap();
        assert_eq!(version, P2PKH_VERSION);
        assert_eq!(hex::encode(hash), VECTOR_HASH);
    }

    #[test]
    fn test_roundtrip_p2pkh() {
        let hash = [0x5a; 20];
        let address = decode(&encode(P2PKH_VERSION, &hash)).unwrap();
        assert_eq!(address, (P2PKH_VERSION, hash.to_vec()));
    }

    #[test]
    fn test_roundtrip_p2sh_version() {
        let hash = [0x77; 20];
        let (version, decoded) = decode(&encode(P2SH_VERSION, &hash)).unwrap();
        assert_eq!(version, P2SH_VERSION);
        assert_eq!(decoded, hash.to_vec());
    }

    #[test]
    fn test_encode_uses_lowercase_alphabet() {
        let address = encode(P2PKH_VERSION, &[0xc3; 20]);
        assert!(address
            .bytes()
            .all(|b| BASE32_ALPHABET.contains(&b)));
    }

    /// Substituting any single character for a different alphabet
    /// character breaks the checksum.
    #[test]
    fn test_single_character_corruption_detected() {
        let address = encode(P2PKH_VERSION, &[0x1f; 20]);
        for pos in [0, 7, address.len() / 2, address.len() - 1] {
            let original = address.as_bytes()[pos];
            let replacement = *BASE32_ALPHABET
                .iter()
                .find(|&&c| c != original)
                .unwrap();
            let mut corrupted = address.clone().into_bytes();
            corrupted[pos] = replacement;
            let corrupted = String::from_utf8(corrupted).unwrap();
            assert!(decode(&corrupted).is_err(), "flip at {} not detected", pos);
        }
    }

    #[test]
    fn test_decode_rejects_foreign_characters() {
        assert!(matches!(
            decode("qpm2qsznhks23z7629mms6s4cwef74vcwv!22gdx6a"),
            Err(ScriptError::AddressChar('!'))
        ));
        // '1' and 'b' are not in the CashAddr alphabet.
        assert!(matches!(
            decode("1qpm2qsznhks23z"),
            Err(ScriptError::AddressChar('1'))
        ));
        // A prefixed address is rejected on the ':' separator.
        assert!(matches!(
            decode(&format!("bitcoincash:{}", VECTOR_ADDRESS)),
            Err(ScriptError::AddressChar(_))
        ));
    }

    #[test]
    fn test_decode_rejects_too_short() {
        assert!(matches!(decode(""), Err(ScriptError::AddressLength)));
        assert!(matches!(decode("qqqqqqqq"), Err(ScriptError::AddressLength)));
    }

    #[test]
    fn test_poly_mod_checksum_of_valid_address_is_zero() {
        let address = encode(P2PKH_VERSION, &[0x00; 20]);
        let symbols: Vec<u8> = address
            .bytes()
            .map(|b| BASE32_ALPHABET.iter().position(|&a| a == b).unwrap() as u8)
            .collect();
        assert_eq!(poly_mod(checksum_prefix().chain(symbols)), 0);
    }

    #[test]
    fn test_bytes_to_base32_roundtrip() {
        for len in [1usize, 5, 20, 21, 32] {
            let data: Vec<u8> = (0..len as u8).map(|i| i.wrapping_mul(37)).collect();
            let symbols = bytes_to_base32(&data);
            let back = base32_to_bytes(&symbols).unwrap();
            assert_eq!(back, data, "length {}", len);
        }
    }

    /// Non-zero padding bits are rejected when unpacking symbols.
    #[test]
    fn test_base32_to_bytes_padding_check() {
        // One symbol = 5 bits, 0 whole bytes, all 5 bits are padding.
        assert!(matches!(
            base32_to_bytes(&[0x01]),
            Err(ScriptError::AddressPadding)
        ));
        assert_eq!(base32_to_bytes(&[0x00]).unwrap(), Vec::<u8>::new());

        // Two symbols = 10 bits = 1 byte + 2 padding bits.
        assert!(base32_to_bytes(&[0x1f, 0x1c]).is_ok());
        assert!(matches!(
            base32_to_bytes(&[0x1f, 0x1d]),
            Err(ScriptError::AddressPadding)
        ));
    }

    #[test]
    fn test_encode_pubkey_matches_manual_hash() {
        let pub_key =
            hex::decode("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
                .unwrap();
        let expected = encode(P2PKH_VERSION, &hash160(&pub_key));
        assert_eq!(encode_pubkey(&pub_key), expected);
    }
}
