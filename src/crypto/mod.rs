//! Cryptographic operations for HD wallet address derivation.
//!
//! This module provides:
//! - BIP39 seed stretching from a mnemonic and passphrase
//! - BIP32 master and child key derivation along a path
//! - Bech32 address encoding of the resulting public key

mod address;
mod bip32;
mod seed;

pub use address::{encode_bech32, hash160};
pub use bip32::{
    ChildIndex, CompressedPublicKey, DerivationPath, ExtendedKey, HdDeriver, HARDENED_OFFSET,
};
pub use seed::{Seed, PBKDF2_ROUNDS};
