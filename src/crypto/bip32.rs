//! Hierarchical deterministic key derivation (BIP32).
//!
//! Only private-parent to private-child derivation is needed: the search
//! walks from the master key down to the leaf and keeps nothing but the
//! leaf's compressed public key.

use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use secp256k1::{All, PublicKey, Scalar, Secp256k1, SecretKey};
use sha2::Sha512;

use super::Seed;
use crate::error::{Result, VanityError};

/// Offset added to an index to mark hardened derivation.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// HMAC key used to derive the master node from a seed.
const MASTER_KEY_LABEL: &[u8] = b"Bitcoin seed";

type HmacSha512 = Hmac<Sha512>;

/// A compressed secp256k1 public key.
pub type CompressedPublicKey = [u8; 33];

/// One step of a derivation path.
///
/// Stores the raw 32-bit index; hardened indices carry [`HARDENED_OFFSET`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildIndex(u32);

impl ChildIndex {
    /// A hardened index (`n'`).
    ///
    /// # Panics
    /// Panics if `n` already has the hardened bit set.
    pub const fn hardened(n: u32) -> Self {
        assert!(n < HARDENED_OFFSET, "hardened index out of range");
        Self(n + HARDENED_OFFSET)
    }

    /// A non-hardened index.
    ///
    /// # Panics
    /// Panics if `n` has the hardened bit set.
    pub const fn normal(n: u32) -> Self {
        assert!(n < HARDENED_OFFSET, "normal index out of range");
        Self(n)
    }

    /// The raw index, including the hardened offset.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_hardened(self) -> bool {
        self.0 & HARDENED_OFFSET != 0
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hardened() {
            write!(f, "{}'", self.0 - HARDENED_OFFSET)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Debug for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChildIndex({})", self)
    }
}

impl FromStr for ChildIndex {
    type Err = VanityError;

    /// Parses a single path segment: decimal digits, optionally followed by
    /// one of the hardened markers `'`, `h` or `H`.
    fn from_str(segment: &str) -> Result<Self> {
        let (digits, hardened) = match segment.strip_suffix(&['\'', 'h', 'H'][..]) {
            Some(digits) => (digits, true),
            None => (segment, false),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VanityError::InvalidPath(format!(
                "segment {:?} is not a decimal index",
                segment
            )));
        }

        let n: u32 = digits
            .parse()
            .ok()
            .filter(|n| *n < HARDENED_OFFSET)
            .ok_or_else(|| {
                VanityError::InvalidPath(format!("segment {:?} is out of range", segment))
            })?;

        Ok(if hardened {
            Self(n + HARDENED_OFFSET)
        } else {
            Self(n)
        })
    }
}

/// An ordered, root-to-leaf list of child indices such as `m/84'/0'/0'/0/0`.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct DerivationPath(Vec<ChildIndex>);

impl DerivationPath {
    /// The indices in root-to-leaf order.
    pub fn indices(&self) -> &[ChildIndex] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for DerivationPath {
    type Err = VanityError;

    fn from_str(path: &str) -> Result<Self> {
        let mut segments = path.split('/');

        match segments.next() {
            Some("m") | Some("M") => {}
            _ => {
                return Err(VanityError::InvalidPath(format!(
                    "{:?} must start with \"m\"",
                    path
                )))
            }
        }

        segments
            .map(ChildIndex::from_str)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

impl fmt::Debug for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivationPath({})", self)
    }
}

/// A node of the HD tree: private key plus chain code.
///
/// The private key is a `SecretKey`, so it is always a valid scalar in
/// `[1, N)`. Derivation produces new nodes; a node is never mutated.
#[derive(Debug, Clone)]
pub struct ExtendedKey {
    private_key: SecretKey,
    chain_code: [u8; 32],
}

impl ExtendedKey {
    /// Derives the master node from a seed.
    pub fn master(seed: &Seed) -> Result<Self> {
        Self::from_seed_bytes(seed.as_bytes())
    }

    /// Derives the master node from seed bytes of any length.
    pub fn from_seed_bytes(seed: &[u8]) -> Result<Self> {
        let output = hmac_sha512(MASTER_KEY_LABEL, &[seed]);
        let (key, chain_code) = split(&output);

        let private_key =
            SecretKey::from_slice(&key).map_err(|_| VanityError::InvalidMasterKey)?;

        Ok(Self {
            private_key,
            chain_code,
        })
    }

    /// The 32-byte big-endian private key.
    pub fn private_key_bytes(&self) -> [u8; 32] {
        self.private_key.secret_bytes()
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }
}

/// Walks derivation paths on the secp256k1 curve.
///
/// Holds a signing context; create one per thread and reuse it.
pub struct HdDeriver {
    secp: Secp256k1<All>,
}

impl HdDeriver {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::new(),
        }
    }

    /// Computes the compressed public key of a node.
    #[inline]
    pub fn public_key(&self, key: &ExtendedKey) -> CompressedPublicKey {
        PublicKey::from_secret_key(&self.secp, &key.private_key).serialize()
    }

    /// Derives one child node.
    ///
    /// `parent_public` must be the compressed public key of `parent`; it is
    /// only read for non-hardened indices.
    pub fn derive_child(
        &self,
        parent: &ExtendedKey,
        parent_public: &CompressedPublicKey,
        index: ChildIndex,
    ) -> Result<ExtendedKey> {
        let index_bytes = index.raw().to_be_bytes();

        let output = if index.is_hardened() {
            let private = parent.private_key.secret_bytes();
            hmac_sha512(
                &parent.chain_code,
                &[&[0x00][..], &private[..], &index_bytes[..]],
            )
        } else {
            hmac_sha512(&parent.chain_code, &[&parent_public[..], &index_bytes[..]])
        };

        let (factor, chain_code) = split(&output);
        let private_key = add_factor(&parent.private_key, factor, index)?;

        Ok(ExtendedKey {
            private_key,
            chain_code,
        })
    }

    /// Derives the node at `path` below `master`.
    pub fn derive_path(&self, master: &ExtendedKey, path: &DerivationPath) -> Result<ExtendedKey> {
        let mut key = master.clone();
        let indices = path.indices();

        // Public key of `key`, kept only when the next step needs it.
        let mut public = match indices.first() {
            Some(first) if !first.is_hardened() => Some(self.public_key(&key)),
            _ => None,
        };

        for (step, &index) in indices.iter().enumerate() {
            let parent_public = public.as_ref().unwrap_or(&[0u8; 33]);
            key = self.derive_child(&key, parent_public, index)?;

            public = match indices.get(step + 1) {
                Some(next) if !next.is_hardened() => Some(self.public_key(&key)),
                _ => None,
            };
        }

        Ok(key)
    }

    /// Runs the full pipeline from mnemonic to the compressed public key at
    /// `path`.
    pub fn derive_public_key(
        &self,
        mnemonic: &str,
        passphrase: &str,
        path: &DerivationPath,
    ) -> Result<CompressedPublicKey> {
        let seed = Seed::from_mnemonic(mnemonic, passphrase);
        let master = ExtendedKey::master(&seed)?;
        let leaf = self.derive_path(&master, path)?;
        Ok(self.public_key(&leaf))
    }
}

impl Default for HdDeriver {
    fn default() -> Self {
        Self::new()
    }
}

/// `(parent + factor) mod N`, rejecting `factor >= N` and a zero result.
fn add_factor(parent: &SecretKey, factor: [u8; 32], index: ChildIndex) -> Result<SecretKey> {
    let tweak = Scalar::from_be_bytes(factor).map_err(|_| VanityError::DerivationFailure(index))?;
    parent
        .add_tweak(&tweak)
        .map_err(|_| VanityError::DerivationFailure(index))
}

fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> [u8; 64] {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC can take key of any size");
    for part in parts {
        mac.update(part);
    }
    let mut output = [0u8; 64];
    output.copy_from_slice(&mac.finalize().into_bytes());
    output
}

fn split(output: &[u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&output[..32]);
    right.copy_from_slice(&output[32..]);
    (left, right)
}
