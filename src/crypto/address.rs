//! Bech32 address encoding for compressed public keys.

use bech32::{u5, Variant};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// RIPEMD-160 of SHA-256: the standard 20-byte public key hash.
#[inline]
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(data)).into()
}

/// Encodes a public key as a bech32 address under `hrp`.
///
/// The key hash is regrouped into 5-bit words (with padding). When
/// `witness_version` is given it is prepended as the first word, which yields
/// a segwit v0 address for `hrp = "bc"`, `witness_version = Some(0)`.
/// Without a version the hash words are encoded directly, as Cosmos does.
pub fn encode_bech32(public_key: &[u8], hrp: &str, witness_version: Option<u8>) -> Result<String> {
    let hash = hash160(public_key);
    let groups = bech32::convert_bits(&hash, 8, 5, true)?;

    let mut data = Vec::with_capacity(groups.len() + 1);
    if let Some(version) = witness_version {
        data.push(u5::try_from_u8(version)?);
    }
    for group in groups {
        data.push(u5::try_from_u8(group)?);
    }

    Ok(bech32::encode(hrp, data, Variant::Bech32)?)
}
