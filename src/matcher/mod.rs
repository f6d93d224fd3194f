//! Vanity matching for bech32 addresses.
//!
//! A candidate matches when the wanted string follows the currency's fixed
//! address prefix (`bc1q`, `cosmos1`) exactly.

mod pattern;

pub use pattern::{check_vanity, MatchResult, Pattern, BECH32_CHARSET, MAX_VANITY_LEN};
