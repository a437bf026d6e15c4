use alloy::primitives::U256;

use crate::domain::Announcement;
use crate::tx_summary::format_ether;

/// Turns polled balances into polite live-region updates.
#[derive(Debug, Clone, Default)]
pub struct BalanceAnnouncer {
    symbol: String,
    last: Option<U256>,
}

impl BalanceAnnouncer {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            last: None,
        }
    }

    pub fn last(&self) -> Option<U256> {
        self.last
    }

    /// The first observation only primes the announcer.
    pub fn observe(&mut self, balance_wei: U256) -> Option<Announcement> {
        let previous = self.last.replace(balance_wei)?;
        let direction = match balance_wei.cmp(&previous) {
            std::cmp::Ordering::Equal => return None,
            std::cmp::Ordering::Greater => "increased",
            std::cmp::Ordering::Less => "decreased",
        };
        Some(Announcement::polite(format!(
            "Balance {direction} to {} {}",
            format_ether(balance_wei),
            self.symbol
        )))
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
