use serde::{Deserialize, Serialize};
use statesync_common::Address;
use std::{fs::File, io::BufReader, path::Path};
use thiserror::Error;

use crate::messages::DEFAULT_COMPRESSION_LEVEL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to open config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid compression level {0}, expected 0-9")]
    InvalidCompressionLevel(u32),
}

/// Settings shared by the sending and receiving side of the sync protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Version stamped on outgoing messages and required on incoming ones.
    pub app_protocol_version: i32,
    /// Accepted signers of version stamps. Empty accepts any valid signature.
    pub trusted_version_signers: Vec<Address>,
    pub compression_level: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            app_protocol_version: 1,
            trusted_version_signers: Vec::new(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl SyncConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compression_level > 9 {
            return Err(ConfigError::InvalidCompressionLevel(self.compression_level));
        }
        Ok(())
    }

    pub fn trusts_signer(&self, signer: &Address) -> bool {
        self.trusted_version_signers.is_empty() || self.trusted_version_signers.contains(signer)
    }
}
