//! Vanity prefix matching.

use crate::error::{Result, VanityError};

/// The bech32 data alphabet. Only these characters can follow the separator.
pub const BECH32_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Characters a 20-byte hash occupies after the fixed prefix, checksum excluded.
pub const MAX_VANITY_LEN: usize = 32;

/// Returns true iff `address` starts with exactly `prefix` followed by `vanity`.
///
/// Comparison is case-sensitive; an empty `vanity` matches every address
/// that carries `prefix`.
#[inline]
pub fn check_vanity(address: &str, prefix: &str, vanity: &str) -> bool {
    address
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with(vanity))
}

/// Result of a pattern match operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// Full match found
    Match,
    /// No match
    NoMatch,
}

impl MatchResult {
    #[inline]
    pub fn is_match(self) -> bool {
        matches!(self, MatchResult::Match)
    }
}

/// A vanity target: the currency's fixed address prefix plus the wanted string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// Fixed prefix every address of the currency has (`bc1q`, `cosmos1`)
    address_prefix: String,
    /// The wanted characters right after the fixed prefix
    vanity: String,
}

impl Pattern {
    /// Creates a pattern, rejecting vanity strings that no bech32 address
    /// can contain or that run past the hash into the checksum.
    pub fn new(address_prefix: impl Into<String>, vanity: impl Into<String>) -> Result<Self> {
        let vanity = vanity.into();

        if vanity.len() > MAX_VANITY_LEN || !vanity.chars().all(|c| BECH32_CHARSET.contains(c)) {
            return Err(VanityError::InvalidVanity(vanity));
        }

        Ok(Self {
            address_prefix: address_prefix.into(),
            vanity,
        })
    }

    pub fn address_prefix(&self) -> &str {
        &self.address_prefix
    }

    pub fn vanity(&self) -> &str {
        &self.vanity
    }

    /// Matches an address against this pattern.
    #[inline]
    pub fn matches(&self, address: &str) -> MatchResult {
        if check_vanity(address, &self.address_prefix, &self.vanity) {
            MatchResult::Match
        } else {
            MatchResult::NoMatch
        }
    }

    /// Returns the expected number of attempts to find a match.
    ///
    /// Each bech32 character has 32 possible values.
    pub fn estimated_difficulty(&self) -> u64 {
        32u64.saturating_pow(self.vanity.len() as u32)
    }

    /// Returns a human-readable difficulty estimate.
    ///
    /// Every attempt runs a full PBKDF2 stretch, so a core manages roughly a
    /// few hundred attempts per second.
    pub fn difficulty_description(&self) -> String {
        let diff = self.estimated_difficulty();
        match diff {
            0..=1_000 => "Very Easy (seconds)".into(),
            1_001..=100_000 => "Easy (minutes)".into(),
            100_001..=10_000_000 => "Medium (hours)".into(),
            10_000_001..=1_000_000_000 => "Hard (weeks)".into(),
            _ => "Very Hard (years or more)".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu";

    #[test]
    fn test_check_vanity() {
        assert!(check_vanity(ADDRESS, "bc1q", "cr8"));
        assert!(check_vanity(ADDRESS, "bc1q", ""));
        assert!(!check_vanity(ADDRESS, "bc1q", "cr9"));
        assert!(!check_vanity(ADDRESS, "cosmos1", ""));
        assert!(!check_vanity(ADDRESS, "bc1q", "CR8"));
    }

    #[test]
    fn test_vanity_must_follow_prefix() {
        // "cr8" appears in the address but not right after the prefix.
        assert!(!check_vanity("bc1qxxcr8", "bc1q", "cr8"));
    }

    #[test]
    fn test_pattern_match() {
        let pattern = Pattern::new("bc1q", "cr8te").unwrap();
        assert!(pattern.matches(ADDRESS).is_match());

        let pattern = Pattern::new("bc1q", "qqq").unwrap();
        assert!(!pattern.matches(ADDRESS).is_match());
    }

    #[test]
    fn test_empty_vanity_matches_prefix() {
        let pattern = Pattern::new("cosmos1", "").unwrap();
        assert!(pattern.matches("cosmos19rl4cm2hmr8afy4kldpxz3fka4jguq0auqdal4").is_match());
        assert!(!pattern.matches(ADDRESS).is_match());
    }

    #[test]
    fn test_rejects_impossible_vanity() {
        for vanity in ["b", "1", "io", "Q", "abc"] {
            assert!(matches!(
                Pattern::new("bc1q", vanity),
                Err(VanityError::InvalidVanity(_))
            ));
        }
    }

    #[test]
    fn test_vanity_length_limit() {
        let longest = "q".repeat(MAX_VANITY_LEN);
        assert!(Pattern::new("bc1q", longest.as_str()).is_ok());

        let too_long = "q".repeat(MAX_VANITY_LEN + 1);
        assert!(matches!(
            Pattern::new("cosmos1", too_long),
            Err(VanityError::InvalidVanity(_))
        ));
    }

    #[test]
    fn test_difficulty() {
        let pattern = Pattern::new("bc1q", "dead").unwrap();
        assert_eq!(pattern.estimated_difficulty(), 1_048_576); // 32^4

        let pattern = Pattern::new("bc1q", "").unwrap();
        assert_eq!(pattern.estimated_difficulty(), 1);
        assert_eq!(pattern.difficulty_description(), "Very Easy (seconds)");
    }
}
