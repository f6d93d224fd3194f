//! Supported currencies and their address/derivation settings.

use std::fmt;
use std::str::FromStr;

use crate::crypto::{encode_bech32, DerivationPath, HdDeriver};
use crate::error::{Result, VanityError};

/// A supported currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    /// Bitcoin native segwit (P2WPKH), BIP84.
    #[default]
    Bitcoin,
    /// Cosmos Hub account address.
    Cosmos,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Bitcoin, Currency::Cosmos];

    /// The identifier used on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Currency::Bitcoin => "bitcoin",
            Currency::Cosmos => "cosmos",
        }
    }

    /// Every address of this currency starts with this string.
    pub fn address_prefix(self) -> &'static str {
        match self {
            Currency::Bitcoin => "bc1q",
            Currency::Cosmos => "cosmos1",
        }
    }

    pub fn derivation_path(self) -> &'static str {
        match self {
            Currency::Bitcoin => "m/84'/0'/0'/0/0",
            Currency::Cosmos => "m/44'/118'/0'/0/0",
        }
    }

    /// Bech32 human-readable part.
    pub fn hrp(self) -> &'static str {
        match self {
            Currency::Bitcoin => "bc",
            Currency::Cosmos => "cosmos",
        }
    }

    /// Witness version word prepended to the key hash, if any.
    pub fn witness_version(self) -> Option<u8> {
        match self {
            Currency::Bitcoin => Some(0),
            Currency::Cosmos => None,
        }
    }
}

impl FromStr for Currency {
    type Err = VanityError;

    fn from_str(s: &str) -> Result<Self> {
        Currency::ALL
            .into_iter()
            .find(|currency| currency.id() == s)
            .ok_or_else(|| VanityError::InvalidCurrency(s.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Resolved settings for one currency, with its path parsed once.
#[derive(Debug, Clone)]
pub struct CurrencyConfig {
    currency: Currency,
    path: DerivationPath,
}

impl CurrencyConfig {
    fn new(currency: Currency) -> Result<Self> {
        Ok(Self {
            currency,
            path: currency.derivation_path().parse()?,
        })
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn address_prefix(&self) -> &'static str {
        self.currency.address_prefix()
    }

    pub fn path(&self) -> &DerivationPath {
        &self.path
    }

    /// Derives this currency's address for a mnemonic and passphrase.
    pub fn derive_address(
        &self,
        deriver: &HdDeriver,
        mnemonic: &str,
        passphrase: &str,
    ) -> Result<String> {
        let public_key = deriver.derive_public_key(mnemonic, passphrase, &self.path)?;
        encode_bech32(
            &public_key,
            self.currency.hrp(),
            self.currency.witness_version(),
        )
    }
}

/// Read-only table of every supported currency.
///
/// Built once at startup and shared by reference.
#[derive(Debug, Clone)]
pub struct CurrencyRegistry {
    entries: Vec<CurrencyConfig>,
}

impl CurrencyRegistry {
    /// Builds the registry of all supported currencies.
    pub fn new() -> Result<Self> {
        let entries = Currency::ALL
            .into_iter()
            .map(CurrencyConfig::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Looks up a currency by its identifier.
    pub fn get(&self, id: &str) -> Result<&CurrencyConfig> {
        let currency: Currency = id.parse()?;
        self.entries
            .iter()
            .find(|entry| entry.currency == currency)
            .ok_or_else(|| VanityError::InvalidCurrency(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CurrencyConfig> {
        self.entries.iter()
    }
}
