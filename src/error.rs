//! Error types for derivation and search.

use std::time::Duration;

use crate::crypto::ChildIndex;

/// Errors produced by the derivation pipeline and the vanity search.
#[derive(Debug, thiserror::Error)]
pub enum VanityError {
    #[error("word count should be a multiple of 3 and between 12 and 24 (got {0})")]
    InvalidWordCount(usize),

    #[error("currency should be one of: bitcoin, cosmos (got {0:?})")]
    InvalidCurrency(String),

    #[error("vanity {0:?} contains characters outside the bech32 alphabet")]
    InvalidVanity(String),

    #[error("number of workers must be at least 1")]
    InvalidWorkerCount,

    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("seed produced an invalid master key")]
    InvalidMasterKey,

    #[error("child key derivation failed at index {0}")]
    DerivationFailure(ChildIndex),

    #[error("address encoding failed: {0}")]
    Encoding(String),

    #[error("mnemonic generation failed: {0}")]
    MnemonicSource(String),

    #[error("search cancelled")]
    Cancelled,

    #[error("no match found within {0:?}")]
    Timeout(Duration),
}

impl VanityError {
    /// Returns true for errors confined to a single candidate.
    ///
    /// A worker discards the candidate and moves on to the next mnemonic.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            VanityError::InvalidMasterKey | VanityError::DerivationFailure(_)
        )
    }
}

impl From<bech32::Error> for VanityError {
    fn from(err: bech32::Error) -> Self {
        VanityError::Encoding(err.to_string())
    }
}

pub type Result<T, E = VanityError> = std::result::Result<T, E>;
