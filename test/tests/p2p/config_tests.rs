use statesync_common::Address;
use statesync_p2p::{SyncConfig, config::ConfigError};
use std::fs;

#[test]
fn test_missing_fields_take_defaults() {
    let config = SyncConfig::from_json("{}").unwrap();
    assert_eq!(config, SyncConfig::default());
    assert_eq!(config.app_protocol_version, 1);
    assert_eq!(config.compression_level, 6);
    assert!(config.trusted_version_signers.is_empty());
}

#[test]
fn test_parse_full_config() {
    let config = SyncConfig::from_json(
        r#"{
            "app_protocol_version": 3,
            "trusted_version_signers": ["0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"],
            "compression_level": 9
        }"#,
    )
    .unwrap();
    assert_eq!(config.app_protocol_version, 3);
    assert_eq!(config.compression_level, 9);

    let signer = Address::from_slice(&hex::decode("7e5f4552091a69125d5dfcb7b8c2659029395bdf").unwrap());
    assert!(config.trusts_signer(&signer));
    assert!(!config.trusts_signer(&Address::zero()));
}

#[test]
fn test_empty_trust_list_accepts_any_signer() {
    assert!(SyncConfig::default().trusts_signer(&Address::zero()));
}

#[test]
fn test_invalid_config() {
    assert!(matches!(
        SyncConfig::from_json(r#"{"compression_level": 10}"#),
        Err(ConfigError::InvalidCompressionLevel(10))
    ));
    assert!(matches!(
        SyncConfig::from_json(r#"{"app_protocol_version": "one"}"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_from_file() {
    let path = std::env::temp_dir().join(format!("statesync-config-{}.json", std::process::id()));
    fs::write(&path, r#"{"compression_level": 1}"#).unwrap();
    let config = SyncConfig::from_file(&path);
    fs::remove_file(&path).unwrap();
    assert_eq!(config.unwrap().compression_level, 1);

    assert!(matches!(
        SyncConfig::from_file(&path),
        Err(ConfigError::Io(_))
    ));
}
