//! Application state types
//!
//! Form inputs are kept as strings and parsed on demand so the user can type
//! freely; parsing errors are shown next to the form.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::{hex, Address, Bytes};

use defi_a11y_adapters::{A11yConfig, Connection};
use defi_a11y_core::{RiskWarning, TransactionSummary, WalletOption};

/// Transaction review form
#[derive(Debug, Clone)]
pub struct TxFormState {
    pub to: String,
    pub amount_eth: String,
    pub data: String,
    pub gas_limit: String,
    pub slippage_bps: String,
    /// Warnings from the last render, used to announce only changes
    pub announced_warnings: Vec<RiskWarning>,
}

impl Default for TxFormState {
    fn default() -> Self {
        Self {
            to: String::new(),
            amount_eth: "0".to_owned(),
            data: "0x".to_owned(),
            gas_limit: "21000".to_owned(),
            slippage_bps: String::new(),
            announced_warnings: Vec::new(),
        }
    }
}

impl TxFormState {
    /// Builds the summary for the connected account. Returns `Ok(None)` while
    /// no recipient has been entered yet.
    pub fn summary(
        &self,
        from: Address,
        config: &A11yConfig,
    ) -> Result<Option<TransactionSummary>, String> {
        let to = self.to.trim();
        if to.is_empty() {
            return Ok(None);
        }
        let to: Address = to
            .parse()
            .map_err(|e| format!("Recipient is not a valid address: {e}"))?;
        let value_wei = parse_ether(self.amount_eth.trim())
            .map_err(|e| format!("Amount is not a valid {} value: {e}", config.native_symbol))?;

        let data = match self.data.trim() {
            "" | "0x" => Bytes::new(),
            raw => Bytes::from(hex::decode(raw).map_err(|e| format!("Calldata is not hex: {e}"))?),
        };

        let gas_limit = match self.gas_limit.trim() {
            "" => None,
            raw => Some(
                raw.parse::<u64>()
                    .map_err(|e| format!("Gas limit is not a number: {e}"))?,
            ),
        };

        Ok(Some(TransactionSummary {
            from,
            to,
            value_wei,
            network: config.network_name.clone(),
            native_symbol: config.native_symbol.clone(),
            gas_limit,
            data,
        }))
    }

    pub fn slippage(&self) -> Option<u32> {
        self.slippage_bps.trim().parse().ok()
    }
}

/// Wallet connection progress
#[derive(Debug, Clone, Default)]
pub struct ConnectState {
    pub connecting: Option<WalletOption>,
    pub connection: Option<Connection>,
    pub last_error: Option<String>,
    pub last_info: Option<String>,
}

impl ConnectState {
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_info = None;
        self.last_error = Some(message.into());
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.last_error = None;
        self.last_info = Some(message.into());
    }

    pub fn is_busy(&self) -> bool {
        self.connecting.is_some()
    }
}

/// Address inspector input
#[derive(Debug, Clone, Default)]
pub struct AddressInspectState {
    pub input: String,
}
