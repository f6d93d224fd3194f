//! End-to-end derivation against published BIP84 vectors.

use bech32::{FromBase32, Variant};

use hd_vanity::crypto::{encode_bech32, hash160};
use hd_vanity::{
    Bip39Source, CurrencyRegistry, DerivationPath, HdDeriver, MnemonicSource, WordCount,
};

const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon \
                             abandon abandon abandon abandon abandon about";

/// (path, compressed public key, address) from BIP84.
const BIP84_VECTORS: &[(&str, &str, &str)] = &[
    (
        "m/84'/0'/0'/0/0",
        "0330d54fd0dd420a6e5f8d3624f5f3482cae350f79d5f0753bf5beef9c2d91af3c",
        "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu",
    ),
    (
        "m/84'/0'/0'/0/1",
        "03e775fd51f0dfb8cd865d9ff1cca2a158cf651fe997fdc9fee9c1d3b5e995ea77",
        "bc1qnjg0jd8228aq7egyzacy8cys3knf9xvrerkf9g",
    ),
    (
        "m/84'/0'/0'/1/0",
        "03025324888e429ab8e3dbaf1f7802648b9cd01e9b418485c5fa4c1b9b5700e1a6",
        "bc1q8c6fshw2dlwun7ekn9qwf37cu2rn755upcp6el",
    ),
];

#[test]
fn test_bip84_vectors() {
    let deriver = HdDeriver::new();

    for (path, expected_public, expected_address) in BIP84_VECTORS {
        let path: DerivationPath = path.parse().unwrap();
        let public = deriver.derive_public_key(ABANDON_ABOUT, "", &path).unwrap();
        assert_eq!(hex::encode(public), *expected_public, "public key at {}", path);

        let address = encode_bech32(&public, "bc", Some(0)).unwrap();
        assert_eq!(address, *expected_address, "address at {}", path);
    }
}

#[test]
fn test_registry_bitcoin_address() {
    let registry = CurrencyRegistry::new().unwrap();
    let deriver = HdDeriver::new();
    let address = registry
        .get("bitcoin")
        .unwrap()
        .derive_address(&deriver, ABANDON_ABOUT, "")
        .unwrap();
    assert_eq!(address, "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu");
}

#[test]
fn test_registry_cosmos_address() {
    let registry = CurrencyRegistry::new().unwrap();
    let deriver = HdDeriver::new();
    let address = registry
        .get("cosmos")
        .unwrap()
        .derive_address(&deriver, ABANDON_ABOUT, "")
        .unwrap();
    assert_eq!(address, "cosmos19rl4cm2hmr8afy4kldpxz3fka4jguq0auqdal4");
}

#[test]
fn test_passphrase_changes_address() {
    let registry = CurrencyRegistry::new().unwrap();
    let deriver = HdDeriver::new();
    let bitcoin = registry.get("bitcoin").unwrap();

    let plain = bitcoin.derive_address(&deriver, ABANDON_ABOUT, "").unwrap();
    let with_passphrase = bitcoin
        .derive_address(&deriver, ABANDON_ABOUT, "TREZOR")
        .unwrap();
    assert_ne!(plain, with_passphrase);
    assert!(with_passphrase.starts_with("bc1q"));
}

#[test]
fn test_derivation_is_deterministic() {
    let registry = CurrencyRegistry::new().unwrap();
    let deriver = HdDeriver::new();
    let other = HdDeriver::new();
    let mnemonic = Bip39Source.generate(WordCount::default()).unwrap();

    for config in registry.iter() {
        let a = config.derive_address(&deriver, &mnemonic, "pw").unwrap();
        let b = config.derive_address(&other, &mnemonic, "pw").unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_addresses_pass_bech32_validation() {
    let registry = CurrencyRegistry::new().unwrap();
    let deriver = HdDeriver::new();

    for words in [12, 24] {
        let mnemonic = Bip39Source.generate(WordCount::new(words).unwrap()).unwrap();

        let bitcoin = registry.get("bitcoin").unwrap();
        let address = bitcoin.derive_address(&deriver, &mnemonic, "").unwrap();
        assert!(address.starts_with("bc1q"));
        assert_eq!(address.len(), 42);
        let (hrp, data, variant) = bech32::decode(&address).unwrap();
        assert_eq!((hrp.as_str(), variant), ("bc", Variant::Bech32));
        let public = deriver
            .derive_public_key(&mnemonic, "", bitcoin.path())
            .unwrap();
        assert_eq!(Vec::<u8>::from_base32(&data[1..]).unwrap(), hash160(&public));

        let cosmos = registry.get("cosmos").unwrap();
        let address = cosmos.derive_address(&deriver, &mnemonic, "").unwrap();
        assert!(address.starts_with("cosmos1"));
        assert_eq!(address.len(), 45);
        let (hrp, data, variant) = bech32::decode(&address).unwrap();
        assert_eq!((hrp.as_str(), variant), ("cosmos", Variant::Bech32));
        let public = deriver
            .derive_public_key(&mnemonic, "", cosmos.path())
            .unwrap();
        assert_eq!(Vec::<u8>::from_base32(&data).unwrap(), hash160(&public));
    }
}
