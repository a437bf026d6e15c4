use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, U256};
use thiserror::Error;
use tracing::{info, warn};

use defi_a11y_core::{ConnectionStatus, OptionId, WalletOption};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectorError {
    #[error("{wallet} rejected the connection: {reason}")]
    Rejected { wallet: String, reason: String },
    #[error("{0} is not installed")]
    NotInstalled(String),
    #[error("connector state poisoned: {0}")]
    Poisoned(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub wallet: OptionId,
    pub label: String,
    pub account: Address,
    pub chain_id: u64,
}

/// Stand-in for the external wallet-abstraction library. Connection outcomes
/// can be scripted per wallet.
#[derive(Debug, Clone, Default)]
pub struct SimulatedConnector {
    inner: Arc<Mutex<ConnectorState>>,
}

#[derive(Debug, Default)]
struct ConnectorState {
    failures: HashMap<OptionId, String>,
    connection: Option<Connection>,
    balance_wei: U256,
    chain_id: u64,
    attempts: u64,
}

impl SimulatedConnector {
    pub fn new(chain_id: u64, balance_wei: U256) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ConnectorState {
                chain_id,
                balance_wei,
                ..ConnectorState::default()
            })),
        }
    }

    fn with_state<T>(
        &self,
        f: impl FnOnce(&mut ConnectorState) -> T,
    ) -> Result<T, ConnectorError> {
        let mut g = self
            .inner
            .lock()
            .map_err(|e| ConnectorError::Poisoned(e.to_string()))?;
        Ok(f(&mut *g))
    }

    pub fn fail_with(&self, wallet: &OptionId, reason: &str) -> Result<(), ConnectorError> {
        self.with_state(|s| {
            s.failures.insert(wallet.clone(), reason.to_owned());
        })
    }

    pub fn connect(&self, option: &WalletOption) -> Result<Connection, ConnectorError> {
        if !option.installed {
            return Err(ConnectorError::NotInstalled(option.label.clone()));
        }
        let result = self.with_state(|s| {
            s.attempts += 1;
            if let Some(reason) = s.failures.get(&option.id) {
                return Err(ConnectorError::Rejected {
                    wallet: option.label.clone(),
                    reason: reason.clone(),
                });
            }
            let connection = Connection {
                wallet: option.id.clone(),
                label: option.label.clone(),
                account: simulated_account(s.attempts),
                chain_id: s.chain_id,
            };
            s.connection = Some(connection.clone());
            Ok(connection)
        })?;

        match &result {
            Ok(connection) => {
                info!(wallet = %connection.wallet, account = %connection.account, "wallet connected")
            }
            Err(err) => warn!(wallet = %option.id, error = %err, "wallet connection failed"),
        }
        result
    }

    pub fn disconnect(&self) -> Result<(), ConnectorError> {
        self.with_state(|s| s.connection = None)
    }

    pub fn connection(&self) -> Result<Option<Connection>, ConnectorError> {
        self.with_state(|s| s.connection.clone())
    }

    pub fn balance(&self) -> Result<U256, ConnectorError> {
        self.with_state(|s| s.balance_wei)
    }

    pub fn set_balance(&self, balance_wei: U256) -> Result<(), ConnectorError> {
        self.with_state(|s| s.balance_wei = balance_wei)
    }

    pub fn switch_chain(&self, chain_id: u64) -> Result<(), ConnectorError> {
        self.with_state(|s| {
            s.chain_id = chain_id;
            if let Some(conn) = s.connection.as_mut() {
                conn.chain_id = chain_id;
            }
        })
    }
}

/// Distinct non-zero account for every connection attempt.
fn simulated_account(attempt: u64) -> Address {
    let mut bytes = [0u8; 20];
    bytes[12..].copy_from_slice(&attempt.to_be_bytes());
    Address::from(bytes)
}

/// Live-region status for a finished connection attempt.
pub fn connection_status(
    option: &WalletOption,
    result: &Result<Connection, ConnectorError>,
) -> ConnectionStatus {
    match result {
        Ok(_) => ConnectionStatus::Connected {
            wallet: option.label.clone(),
        },
        Err(ConnectorError::Rejected { reason, .. }) => ConnectionStatus::Failed {
            wallet: option.label.clone(),
            reason: reason.clone(),
        },
        Err(err) => ConnectionStatus::Failed {
            wallet: option.label.clone(),
            reason: err.to_string(),
        },
    }
}
