//! Runtime configuration for the vanity address generator.

use std::time::Duration;

use clap::Parser;

use crate::currency::CurrencyRegistry;
use crate::error::{Result, VanityError};
use crate::matcher::Pattern;
use crate::mnemonic::WordCount;
use crate::worker::SearchSettings;

/// HD Wallet Vanity Address Generator
///
/// Searches random BIP39 mnemonics until the first receive address of the
/// chosen currency starts with the wanted characters.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Currency: bitcoin (bc1q..., m/84'/0'/0'/0/0) or cosmos (cosmos1..., m/44'/118'/0'/0/0)
    #[arg(short, long, default_value = "bitcoin")]
    pub currency: String,

    /// Characters wanted right after the address prefix (bech32 alphabet, case sensitive)
    #[arg(short, long, default_value = "")]
    pub vanity: String,

    /// Mnemonic length: 12, 15, 18, 21 or 24 words
    #[arg(long, default_value = "12")]
    pub words: usize,

    /// Optional BIP39 passphrase
    #[arg(short, long, default_value = "")]
    pub passphrase: String,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short = 'w', long)]
    pub num_workers: Option<usize>,

    /// Progress report interval in seconds
    #[arg(short = 'r', long, default_value = "5", value_parser = clap::value_parser!(u64).range(1..))]
    pub report_interval: u64,

    /// Give up after this many seconds (default: search until found)
    #[arg(short = 't', long)]
    pub timeout: Option<u64>,
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.num_workers.unwrap_or_else(num_cpus::get)
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// Validates the configuration and resolves it against the registry.
    ///
    /// Every configuration error surfaces here, before any worker starts.
    pub fn validate(&self, registry: &CurrencyRegistry) -> Result<SearchSettings> {
        let currency = registry.get(&self.currency)?.clone();
        let words = WordCount::new(self.words)?;
        let pattern = Pattern::new(currency.address_prefix(), self.vanity.as_str())?;

        if self.worker_count() == 0 {
            return Err(VanityError::InvalidWorkerCount);
        }

        Ok(SearchSettings {
            currency,
            pattern,
            words,
            passphrase: self.passphrase.clone(),
        })
    }
}
