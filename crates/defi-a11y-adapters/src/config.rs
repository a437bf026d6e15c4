use std::collections::HashSet;
use std::path::{Path, PathBuf};

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use defi_a11y_core::{DialogConfig, RiskContext};

use crate::catalog::CatalogEntry;

/// Environment variable pointing at a JSON config file.
pub const CONFIG_PATH_ENV: &str = "DEFI_A11Y_CONFIG";

const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct A11yConfig {
    pub dialog_title: String,
    pub dialog_title_id: String,
    pub show_close_button: bool,
    pub close_on_backdrop: bool,
    pub address_prefix_chars: usize,
    pub address_suffix_chars: usize,
    pub network_name: String,
    pub native_symbol: String,
    pub chain_id: u64,
    pub large_value_eth: u64,
    pub max_slippage_bps: u32,
    pub simulated_connect_delay_ms: u64,
    pub wallets: Vec<CatalogEntry>,
}

impl Default for A11yConfig {
    fn default() -> Self {
        Self {
            dialog_title: "Connect a wallet".to_owned(),
            dialog_title_id: "wallet-dialog-title".to_owned(),
            show_close_button: true,
            close_on_backdrop: true,
            address_prefix_chars: 4,
            address_suffix_chars: 4,
            network_name: "Ethereum".to_owned(),
            native_symbol: "ETH".to_owned(),
            chain_id: 1,
            large_value_eth: 10,
            max_slippage_bps: 100,
            simulated_connect_delay_ms: 800,
            wallets: crate::catalog::default_entries(),
        }
    }
}

impl A11yConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&raw)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Reads the file named by `DEFI_A11Y_CONFIG`, or falls back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::load_from_path(PathBuf::from(path)),
            None => {
                debug!("{CONFIG_PATH_ENV} not set, using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address_prefix_chars == 0 || self.address_suffix_chars == 0 {
            return Err(ConfigError::Invalid(
                "address prefix and suffix must show at least one character".to_owned(),
            ));
        }
        let visible = self
            .address_prefix_chars
            .checked_add(self.address_suffix_chars);
        if visible.map_or(true, |chars| chars > 40) {
            return Err(ConfigError::Invalid(format!(
                "address prefix ({}) + suffix ({}) exceeds 40 hex characters",
                self.address_prefix_chars, self.address_suffix_chars
            )));
        }
        if self.dialog_title.trim().is_empty() {
            return Err(ConfigError::Invalid("dialog_title is empty".to_owned()));
        }

        let mut seen = HashSet::new();
        for entry in &self.wallets {
            if !seen.insert(entry.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate wallet id {}",
                    entry.id
                )));
            }
        }
        Ok(())
    }

    pub fn dialog_config(&self) -> DialogConfig {
        DialogConfig {
            title: self.dialog_title.clone(),
            title_id: self.dialog_title_id.clone(),
            has_close_button: self.show_close_button,
            close_on_backdrop: self.close_on_backdrop,
        }
    }

    pub fn large_value_wei(&self) -> U256 {
        U256::from(self.large_value_eth) * U256::from(WEI_PER_ETHER)
    }

    /// Risk context for a wallet currently on `wallet_chain_id`.
    pub fn risk_context(&self, wallet_chain_id: u64) -> RiskContext {
        RiskContext {
            wallet_chain_id,
            target_chain_id: self.chain_id,
            large_value_wei: self.large_value_wei(),
            max_slippage_bps: self.max_slippage_bps,
            slippage_bps: None,
            known_recipients: Vec::new(),
            verified_contracts: Vec::new(),
        }
    }
}
