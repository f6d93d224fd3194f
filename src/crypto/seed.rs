//! Mnemonic to seed stretching (BIP39).

use std::fmt;

use sha2::Sha512;

/// PBKDF2 iteration count for BIP39 seed derivation.
pub const PBKDF2_ROUNDS: u32 = 2048;

/// Salt label prepended to the passphrase.
const SALT_PREFIX: &str = "mnemonic";

/// A 64-byte BIP39 seed.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed([u8; 64]);

impl Seed {
    /// Stretches a mnemonic and passphrase into a seed.
    ///
    /// PBKDF2-HMAC-SHA512 over the mnemonic bytes, salted with
    /// `"mnemonic" || passphrase`, 2048 rounds. The mnemonic is taken as-is;
    /// no word list validation or normalization is applied here.
    pub fn from_mnemonic(mnemonic: &str, passphrase: &str) -> Self {
        let salt = format!("{}{}", SALT_PREFIX, passphrase);

        let mut seed = [0u8; 64];
        pbkdf2::pbkdf2_hmac::<Sha512>(
            mnemonic.as_bytes(),
            salt.as_bytes(),
            PBKDF2_ROUNDS,
            &mut seed,
        );

        Self(seed)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}
