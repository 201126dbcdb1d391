//! Trading status storage.
//!
//! The engine only *stores* statuses and consults the effective one when
//! validating commands; session scheduling and status transitions live in
//! the excluded trading-calendar layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a book is accepting order flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradingStatus {
    OpenForTrading,
    Halted,
    PreOpen,
    NotAvailableForTrading,
}

impl TradingStatus {
    /// Whether new orders and quotes may be placed.
    #[must_use]
    pub fn allows_placing(self) -> bool {
        matches!(self, Self::OpenForTrading)
    }
}

impl fmt::Display for TradingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenForTrading => write!(f, "OPEN_FOR_TRADING"),
            Self::Halted => write!(f, "HALTED"),
            Self::PreOpen => write!(f, "PRE_OPEN"),
            Self::NotAvailableForTrading => write!(f, "NOT_AVAILABLE_FOR_TRADING"),
        }
    }
}

/// The status slots of a book. The effective status is the most specific
/// one set: manual override, then fast-market, then scheduled, then the
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingStatuses {
    pub default: TradingStatus,
    pub scheduled: Option<TradingStatus>,
    pub fast_market: Option<TradingStatus>,
    pub manual: Option<TradingStatus>,
}

impl TradingStatuses {
    #[must_use]
    pub fn new(default: TradingStatus) -> Self {
        Self {
            default,
            scheduled: None,
            fast_market: None,
            manual: None,
        }
    }

    /// The status currently in force.
    #[must_use]
    pub fn effective(&self) -> TradingStatus {
        self.manual
            .or(self.fast_market)
            .or(self.scheduled)
            .unwrap_or(self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_open_allows_placing() {
        assert!(TradingStatus::OpenForTrading.allows_placing());
        assert!(!TradingStatus::Halted.allows_placing());
        assert!(!TradingStatus::PreOpen.allows_placing());
        assert!(!TradingStatus::NotAvailableForTrading.allows_placing());
    }

    #[test]
    fn effective_falls_back_to_default() {
        let statuses = TradingStatuses::new(TradingStatus::OpenForTrading);
        assert_eq!(statuses.effective(), TradingStatus::OpenForTrading);
    }

    #[test]
    fn manual_overrides_everything() {
        let statuses = TradingStatuses {
            default: TradingStatus::OpenForTrading,
            scheduled: Some(TradingStatus::PreOpen),
            fast_market: Some(TradingStatus::OpenForTrading),
            manual: Some(TradingStatus::Halted),
        };
        assert_eq!(statuses.effective(), TradingStatus::Halted);
    }

    #[test]
    fn precedence_order() {
        let mut statuses = TradingStatuses::new(TradingStatus::NotAvailableForTrading);
        statuses.scheduled = Some(TradingStatus::PreOpen);
        assert_eq!(statuses.effective(), TradingStatus::PreOpen);
        statuses.fast_market = Some(TradingStatus::Halted);
        assert_eq!(statuses.effective(), TradingStatus::Halted);
    }
}
