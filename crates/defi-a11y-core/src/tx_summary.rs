//! Transaction summary rows and the sentence read to screen-reader users.

use alloy::primitives::utils::format_units;
use alloy::primitives::{Address, Bytes, U256};

use crate::address::AddressDisplay;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSummary {
    pub from: Address,
    pub to: Address,
    pub value_wei: U256,
    pub network: String,
    pub native_symbol: String,
    pub gas_limit: Option<u64>,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
    pub aria_label: String,
}

impl SummaryRow {
    fn plain(label: &'static str, value: String) -> Self {
        let aria_label = format!("{label}: {value}");
        Self {
            label,
            value,
            aria_label,
        }
    }
}

/// Formats a wei amount in ether, dropping trailing zeros.
pub fn format_ether(value: U256) -> String {
    match format_units(value, 18u8) {
        Ok(formatted) => {
            let trimmed = if formatted.contains('.') {
                formatted.trim_end_matches('0').trim_end_matches('.')
            } else {
                formatted.as_str()
            };
            trimmed.to_owned()
        }
        Err(_) => format!("{value} wei"),
    }
}

impl TransactionSummary {
    pub fn is_contract_call(&self) -> bool {
        !self.data.is_empty()
    }

    pub fn amount(&self) -> String {
        format!("{} {}", format_ether(self.value_wei), self.native_symbol)
    }

    pub fn rows(&self, prefix_chars: usize, suffix_chars: usize) -> Vec<SummaryRow> {
        let from = AddressDisplay::from_address(self.from, prefix_chars, suffix_chars);
        let to = AddressDisplay::from_address(self.to, prefix_chars, suffix_chars);
        let to_label = if self.is_contract_call() {
            "Contract"
        } else {
            "To"
        };

        let mut rows = vec![
            SummaryRow {
                label: "From",
                aria_label: format!("From: {}", from.aria_label),
                value: from.short,
            },
            SummaryRow {
                label: to_label,
                aria_label: format!("{to_label}: {}", to.aria_label),
                value: to.short,
            },
            SummaryRow::plain("Amount", self.amount()),
            SummaryRow::plain("Network", self.network.clone()),
        ];
        if let Some(gas) = self.gas_limit {
            rows.push(SummaryRow::plain("Gas limit", gas.to_string()));
        }
        if self.is_contract_call() {
            rows.push(SummaryRow::plain("Data", format!("{} bytes", self.data.len())));
        }
        rows
    }

    pub fn spoken_summary(&self, prefix_chars: usize, suffix_chars: usize) -> String {
        let to = AddressDisplay::from_address(self.to, prefix_chars, suffix_chars);
        if self.is_contract_call() {
            format!(
                "Call contract {} with {} on {}",
                to.short,
                self.amount(),
                self.network
            )
        } else {
            format!("Send {} to {} on {}", self.amount(), to.short, self.network)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(value_wei: U256) -> TransactionSummary {
        TransactionSummary {
            from: Address::repeat_byte(0x11),
            to: Address::repeat_byte(0xab),
            value_wei,
            network: "Ethereum".to_owned(),
            native_symbol: "ETH".to_owned(),
            gas_limit: Some(21_000),
            data: Bytes::new(),
        }
    }

    #[test]
    fn ether_formatting_trims_zeros() {
        assert_eq!(format_ether(U256::from(1_500_000_000_000_000_000u128)), "1.5");
        assert_eq!(format_ether(U256::from(2_000_000_000_000_000_000u128)), "2");
        assert_eq!(format_ether(U256::ZERO), "0");
        assert_eq!(format_ether(U256::from(1u64)), "0.000000000000000001");
    }

    #[test]
    fn plain_transfer_summary() {
        let tx = transfer(U256::from(1_500_000_000_000_000_000u128));
        assert_eq!(
            tx.spoken_summary(4, 4).to_lowercase(),
            "send 1.5 eth to 0xabab…abab on ethereum"
        );
        let labels: Vec<_> = tx.rows(4, 4).iter().map(|r| r.label).collect();
        assert_eq!(labels, ["From", "To", "Amount", "Network", "Gas limit"]);
    }

    #[test]
    fn contract_call_adds_data_row() {
        let mut tx = transfer(U256::ZERO);
        tx.data = Bytes::from(vec![0x09, 0x5e, 0xa7, 0xb3]);
        let rows = tx.rows(4, 4);
        assert_eq!(rows[1].label, "Contract");
        assert_eq!(rows.last().map(|r| r.value.as_str()), Some("4 bytes"));
        assert!(tx.spoken_summary(4, 4).starts_with("Call contract"));
    }
}
