//! # Quoter Configuration
//!
//! Caller-side settings for the quote engine. Pool parameters come from the
//! pool config snapshot; this only holds choices the settlement program does
//! not make for us.

use crate::constants::BASIS_POINT_MAX;
use crate::errors::{CoreResult, DbcCoreError};
use crate::types::fees::LinearFeeUnderflow;

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "client")]
use std::{fs, path::Path};

/// Quote engine settings, loadable from TOML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "client", serde(default))]
pub struct QuoterConfig {
    /// Behaviour when a linear fee schedule decays below zero
    pub linear_fee_underflow: LinearFeeUnderflow,

    /// Slippage applied to `minimum_amount_out` when a request names none (basis points)
    pub default_slippage_bps: u16,
}

impl QuoterConfig {
    /// Validate configuration
    pub fn validate(&self) -> CoreResult<()> {
        if u64::from(self.default_slippage_bps) > BASIS_POINT_MAX {
            return Err(DbcCoreError::invalid_configuration(
                "default_slippage_bps",
                &self.default_slippage_bps.to_string(),
                "at most 10000 (100%)",
            ));
        }

        Ok(())
    }
}

#[cfg(feature = "client")]
impl QuoterConfig {
    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        let config: QuoterConfig = toml::from_str(content).map_err(|e| {
            DbcCoreError::InvalidConfiguration(format!("Failed to parse config: {}", e))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DbcCoreError::InvalidConfiguration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded quoter config from {}: {:?}", path.display(), config);

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| {
            DbcCoreError::InvalidConfiguration(format!("Failed to serialize config: {}", e))
        })?;
        fs::write(path, content).map_err(|e| {
            DbcCoreError::InvalidConfiguration(format!(
                "Failed to write config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(())
    }
}
