//! Risk warnings shown next to a transaction summary.

use alloy::primitives::{Address, U256};

use crate::domain::Announcement;
use crate::tx_summary::{format_ether, TransactionSummary};

/// `approve(address,uint256)`
pub const APPROVE_SELECTOR: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskWarning {
    UnlimitedApproval { spender: Address },
    UnverifiedContract(Address),
    HighSlippage { bps: u32, max_bps: u32 },
    LargeValue { amount: String },
    NetworkMismatch { expected: u64, actual: u64 },
    FirstInteraction(Address),
}

impl RiskWarning {
    pub fn message(&self) -> String {
        match self {
            RiskWarning::UnlimitedApproval { spender } => {
                format!("Unlimited token approval for {spender}")
            }
            RiskWarning::UnverifiedContract(addr) => {
                format!("Contract {addr} is not verified")
            }
            RiskWarning::HighSlippage { bps, max_bps } => format!(
                "Slippage {}% exceeds the {}% limit",
                format_bps(*bps),
                format_bps(*max_bps)
            ),
            RiskWarning::LargeValue { amount } => format!("Large transfer of {amount}"),
            RiskWarning::NetworkMismatch { expected, actual } => {
                format!("Wallet is on chain {actual}, transaction targets chain {expected}")
            }
            RiskWarning::FirstInteraction(addr) => {
                format!("First transaction to {addr}")
            }
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            RiskWarning::UnlimitedApproval { .. } | RiskWarning::NetworkMismatch { .. } => {
                Severity::Critical
            }
            RiskWarning::UnverifiedContract(_) | RiskWarning::HighSlippage { .. } => {
                Severity::High
            }
            RiskWarning::LargeValue { .. } | RiskWarning::FirstInteraction(_) => Severity::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Medium,
    High,
    Critical,
}

impl Severity {
    /// ARIA role for the warning container. Critical warnings interrupt.
    pub fn aria_role(self) -> &'static str {
        match self {
            Severity::Critical => "alert",
            Severity::Medium | Severity::High => "status",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Medium => "Caution",
            Severity::High => "Warning",
            Severity::Critical => "Danger",
        }
    }
}

fn format_bps(bps: u32) -> String {
    let whole = bps / 100;
    let frac = bps % 100;
    if frac == 0 {
        whole.to_string()
    } else {
        format!("{whole}.{frac:02}").trim_end_matches('0').to_owned()
    }
}

/// What the front-end knows about the user's situation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskContext {
    pub wallet_chain_id: u64,
    pub target_chain_id: u64,
    pub large_value_wei: U256,
    pub max_slippage_bps: u32,
    pub slippage_bps: Option<u32>,
    pub known_recipients: Vec<Address>,
    pub verified_contracts: Vec<Address>,
}

/// Decodes the spender of an `approve` call whose amount is `uint256::MAX`.
fn unlimited_approval_spender(data: &[u8]) -> Option<Address> {
    if data.len() < 68 || data[..4] != APPROVE_SELECTOR {
        return None;
    }
    let amount = U256::from_be_slice(&data[36..68]);
    (amount == U256::MAX).then(|| Address::from_slice(&data[16..36]))
}

/// Warnings for `tx`, most severe first.
pub fn assess(tx: &TransactionSummary, ctx: &RiskContext) -> Vec<RiskWarning> {
    let mut warnings = Vec::new();

    if ctx.wallet_chain_id != ctx.target_chain_id {
        warnings.push(RiskWarning::NetworkMismatch {
            expected: ctx.target_chain_id,
            actual: ctx.wallet_chain_id,
        });
    }

    if let Some(spender) = unlimited_approval_spender(&tx.data) {
        warnings.push(RiskWarning::UnlimitedApproval { spender });
    }

    if tx.is_contract_call() {
        if !ctx.verified_contracts.contains(&tx.to) {
            warnings.push(RiskWarning::UnverifiedContract(tx.to));
        }
    } else if !ctx.known_recipients.contains(&tx.to) {
        warnings.push(RiskWarning::FirstInteraction(tx.to));
    }

    if let Some(bps) = ctx.slippage_bps.filter(|bps| *bps > ctx.max_slippage_bps) {
        warnings.push(RiskWarning::HighSlippage {
            bps,
            max_bps: ctx.max_slippage_bps,
        });
    }

    if tx.value_wei >= ctx.large_value_wei && !ctx.large_value_wei.is_zero() {
        warnings.push(RiskWarning::LargeValue {
            amount: format!("{} {}", format_ether(tx.value_wei), tx.native_symbol),
        });
    }

    warnings.sort_by(|a, b| b.severity().cmp(&a.severity()));
    warnings
}

/// Live-region text for a freshly rendered warning list.
pub fn announcement_for(warnings: &[RiskWarning]) -> Option<Announcement> {
    let top = warnings.first()?;
    if top.severity() == Severity::Critical {
        let critical: Vec<String> = warnings
            .iter()
            .filter(|w| w.severity() == Severity::Critical)
            .map(RiskWarning::message)
            .collect();
        return Some(Announcement::assertive(format!(
            "Danger: {}.",
            critical.join(". ")
        )));
    }
    let noun = if warnings.len() == 1 {
        "warning"
    } else {
        "warnings"
    };
    Some(Announcement::polite(format!(
        "{} risk {noun} for this transaction.",
        warnings.len()
    )))
}
