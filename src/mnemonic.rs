//! Mnemonic generation.
//!
//! Word lists and checksums are handled by the `bip39` crate; the search only
//! asks for fresh phrases of a given length through [`MnemonicSource`].

use std::fmt;

use bip39::Mnemonic;
use rand::RngCore;

use crate::error::{Result, VanityError};

/// A validated mnemonic length: a multiple of 3 in `12..=24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordCount(usize);

impl WordCount {
    pub const MIN: usize = 12;
    pub const MAX: usize = 24;

    pub fn new(words: usize) -> Result<Self> {
        if words % 3 != 0 || !(Self::MIN..=Self::MAX).contains(&words) {
            return Err(VanityError::InvalidWordCount(words));
        }
        Ok(Self(words))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Entropy size in bytes: 32 bits per 3 words.
    pub fn entropy_bytes(self) -> usize {
        self.0 * 4 / 3
    }
}

impl Default for WordCount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for WordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Produces fresh mnemonics for the search workers.
pub trait MnemonicSource: Send + Sync {
    /// Returns a new space-delimited mnemonic of `words` words.
    fn generate(&self, words: WordCount) -> Result<String>;
}

/// English BIP39 mnemonics from thread-local OS-seeded randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bip39Source;

impl MnemonicSource for Bip39Source {
    fn generate(&self, words: WordCount) -> Result<String> {
        let mut entropy = [0u8; 32];
        let entropy = &mut entropy[..words.entropy_bytes()];
        rand::thread_rng().fill_bytes(entropy);

        let mnemonic = Mnemonic::from_entropy(entropy)
            .map_err(|e| VanityError::MnemonicSource(e.to_string()))?;
        Ok(mnemonic.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_validation() {
        for words in [12, 15, 18, 21, 24] {
            assert_eq!(WordCount::new(words).unwrap().get(), words);
        }
        for words in [0, 3, 9, 11, 13, 25, 27] {
            assert!(matches!(
                WordCount::new(words),
                Err(VanityError::InvalidWordCount(n)) if n == words
            ));
        }
    }

    #[test]
    fn test_entropy_bytes() {
        assert_eq!(WordCount::new(12).unwrap().entropy_bytes(), 16);
        assert_eq!(WordCount::new(18).unwrap().entropy_bytes(), 24);
        assert_eq!(WordCount::new(24).unwrap().entropy_bytes(), 32);
    }

    #[test]
    fn test_generates_valid_mnemonics() {
        for words in [12, 15, 18, 21, 24] {
            let count = WordCount::new(words).unwrap();
            let phrase = Bip39Source.generate(count).unwrap();
            assert_eq!(phrase.split(' ').count(), words);

            let parsed = Mnemonic::parse(&phrase).unwrap();
            assert_eq!(parsed.word_count(), words);
        }
    }

    #[test]
    fn test_mnemonics_differ() {
        let count = WordCount::default();
        let a = Bip39Source.generate(count).unwrap();
        let b = Bip39Source.generate(count).unwrap();
        assert_ne!(a, b);
    }
}
