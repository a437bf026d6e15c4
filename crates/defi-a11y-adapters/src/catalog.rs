//! Wallet catalog and installed-wallet detection.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use defi_a11y_core::{OptionId, WalletOption};

/// Comma separated wallet ids treated as installed by [`EnvProbe`].
pub const INSTALLED_WALLETS_ENV: &str = "DEFI_A11Y_INSTALLED";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: OptionId,
    pub label: String,
    /// Browser-extension wallets must be detected; QR based ones are always
    /// available.
    #[serde(default = "default_true")]
    pub requires_extension: bool,
}

fn default_true() -> bool {
    true
}

impl CatalogEntry {
    pub fn new(id: &str, label: &str, requires_extension: bool) -> Self {
        Self {
            id: OptionId::from(id),
            label: label.to_owned(),
            requires_extension,
        }
    }
}

pub fn default_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("mm", "MetaMask", true),
        CatalogEntry::new("wc", "WalletConnect", false),
        CatalogEntry::new("cb", "Coinbase Wallet", true),
        CatalogEntry::new("rabby", "Rabby", true),
    ]
}

pub trait InstallProbe {
    fn is_installed(&self, id: &OptionId) -> bool;
}

#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    installed: HashSet<String>,
}

impl StaticProbe {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            installed: ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl InstallProbe for StaticProbe {
    fn is_installed(&self, id: &OptionId) -> bool {
        self.installed.contains(id.as_str())
    }
}

/// Reads `DEFI_A11Y_INSTALLED` once at construction.
#[derive(Debug, Clone, Default)]
pub struct EnvProbe {
    inner: StaticProbe,
}

impl EnvProbe {
    pub fn from_env() -> Self {
        let raw = std::env::var(INSTALLED_WALLETS_ENV).unwrap_or_default();
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Self {
        Self {
            inner: StaticProbe::new(
                raw.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_owned),
            ),
        }
    }
}

impl InstallProbe for EnvProbe {
    fn is_installed(&self, id: &OptionId) -> bool {
        self.inner.is_installed(id)
    }
}

/// Builds the dialog options, in catalog order.
pub fn wallet_options(entries: &[CatalogEntry], probe: &dyn InstallProbe) -> Vec<WalletOption> {
    entries
        .iter()
        .map(|entry| {
            let installed = !entry.requires_extension || probe.is_installed(&entry.id);
            debug!(wallet = %entry.id, installed, "wallet availability");
            WalletOption {
                id: entry.id.clone(),
                label: entry.label.clone(),
                installed,
            }
        })
        .collect()
}
