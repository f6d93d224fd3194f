//! # hd_vanity
//!
//! Vanity address generator for HD wallets: searches random BIP39
//! mnemonics until the derived receive address starts with a chosen string.
//!
//! ## Architecture
//!
//! - `crypto`: Seed stretching, BIP32 derivation and bech32 encoding
//! - `currency`: Supported currencies and their paths/prefixes
//! - `mnemonic`: Mnemonic generation
//! - `matcher`: Vanity prefix matching
//! - `worker`: Parallel search and worker pool management
//! - `config`: Runtime configuration

pub mod config;
pub mod crypto;
pub mod currency;
pub mod error;
pub mod matcher;
pub mod mnemonic;
pub mod worker;

pub use config::Config;
pub use crypto::{ChildIndex, DerivationPath, ExtendedKey, HdDeriver, Seed};
pub use currency::{Currency, CurrencyConfig, CurrencyRegistry};
pub use error::{Result, VanityError};
pub use matcher::{check_vanity, MatchResult, Pattern};
pub use mnemonic::{Bip39Source, MnemonicSource, WordCount};
pub use worker::{SearchResult, SearchSettings, WorkerPool};
