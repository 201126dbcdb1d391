//! The book entry model: sides, lifecycle, priority keys, trade snapshots.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Client, ClientRequestId, EntrySizes, EventId, Price};

/// Which side of the book an entry rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Comparator multiplier for price priority: buys rank higher prices
    /// first (−1), sells rank lower prices first (+1).
    #[must_use]
    pub fn sign(self) -> i32 {
        match self {
            Self::Buy => -1,
            Self::Sell => 1,
        }
    }

    /// The side an aggressor on `self` matches against.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// The pricing characteristic of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    Limit,
    Market,
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limit => write!(f, "LIMIT"),
            Self::Market => write!(f, "MARKET"),
        }
    }
}

/// Lifecycle status of a book entry. `Filled` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryStatus {
    New,
    PartialFill,
    Filled,
    Cancelled,
}

impl EntryStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Filled | Self::Cancelled)
    }

    /// The status after a fill that left `sizes` behind.
    #[must_use]
    pub fn traded(sizes: &EntrySizes) -> Self {
        if sizes.available == 0 {
            Self::Filled
        } else {
            Self::PartialFill
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "NEW"),
            Self::PartialFill => write!(f, "PARTIAL_FILL"),
            Self::Filled => write!(f, "FILLED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// How an unmatched remainder is treated after matching completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    GoodTillCancel,
    ImmediateOrCancel,
}

impl TimeInForce {
    /// Whether a remainder of `sizes` may rest on the book.
    #[must_use]
    pub fn can_stay_on_book(self, sizes: &EntrySizes) -> bool {
        match self {
            Self::GoodTillCancel => sizes.available > 0,
            Self::ImmediateOrCancel => false,
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoodTillCancel => write!(f, "GTC"),
            Self::ImmediateOrCancel => write!(f, "IOC"),
        }
    }
}

/// The sort key deciding book priority.
///
/// Priority is price (best first per side), then submission time ascending,
/// then the placing event id ascending. `price` is `None` for market
/// entries, which outrank any priced entry on their side. The triple is
/// unique within a book — the event id tie-break guarantees it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookEntryKey {
    pub price: Option<Price>,
    pub when_submitted: DateTime<Utc>,
    pub event_id: EventId,
}

/// A resting book entry, or the in-flight aggressor being matched.
///
/// Created when an order or quote is accepted onto (or matched against)
/// the book; its sizes and status change only through [`BookEntry::traded`]
/// and [`BookEntry::cancelled`], each returning a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEntry {
    pub key: BookEntryKey,
    pub client_request_id: ClientRequestId,
    pub client: Client,
    pub entry_type: EntryType,
    pub side: Side,
    pub time_in_force: TimeInForce,
    pub sizes: EntrySizes,
    pub status: EntryStatus,
}

impl BookEntry {
    /// The entry after trading `size`, status advanced to `PartialFill` or
    /// `Filled`.
    #[must_use]
    pub fn traded(&self, size: u64) -> Self {
        let sizes = self.sizes.traded(size);
        Self {
            sizes,
            status: EntryStatus::traded(&sizes),
            ..self.clone()
        }
    }

    /// The entry with its whole remainder cancelled.
    #[must_use]
    pub fn cancelled(&self) -> Self {
        Self {
            sizes: self.sizes.cancelled(),
            status: EntryStatus::Cancelled,
            ..self.clone()
        }
    }

    /// Whether this entry was derived from a mass quote.
    #[must_use]
    pub fn is_quote(&self) -> bool {
        self.client_request_id.parent_id.is_some()
    }

    /// The per-side snapshot recorded in a trade event.
    #[must_use]
    pub fn to_trade_side_entry(&self) -> TradeSideEntry {
        TradeSideEntry {
            client_request_id: self.client_request_id.clone(),
            client: self.client.clone(),
            entry_type: self.entry_type,
            side: self.side,
            sizes: self.sizes,
            price: self.key.price,
            time_in_force: self.time_in_force,
            when_submitted: self.key.when_submitted,
            entry_event_id: self.key.event_id,
            status: self.status,
        }
    }
}

/// One side's post-trade snapshot, embedded in a trade event.
///
/// Carries enough to re-identify the resting entry (via
/// [`TradeSideEntry::to_book_entry_key`]) and to apply the recorded sizing
/// without consulting any state outside the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeSideEntry {
    pub client_request_id: ClientRequestId,
    pub client: Client,
    pub entry_type: EntryType,
    pub side: Side,
    pub sizes: EntrySizes,
    pub price: Option<Price>,
    pub time_in_force: TimeInForce,
    pub when_submitted: DateTime<Utc>,
    pub entry_event_id: EventId,
    pub status: EntryStatus,
}

impl TradeSideEntry {
    /// The key identifying the resting entry this snapshot belongs to.
    #[must_use]
    pub fn to_book_entry_key(&self) -> BookEntryKey {
        BookEntryKey {
            price: self.price,
            when_submitted: self.when_submitted,
            event_id: self.entry_event_id,
        }
    }
}

// Test fixtures, compiled for unit tests and for dependents enabling the
// `test-helpers` feature.
#[cfg(any(test, feature = "test-helpers"))]
mod fixtures {
    use chrono::{TimeZone, Utc};

    use super::{
        BookEntry, BookEntryKey, EntrySizes, EntryStatus, EntryType, Side, TimeInForce,
    };
    use crate::{Client, ClientRequestId, EventId, Price};

    impl BookEntry {
        /// A GTC limit entry with deterministic key fields, for tests.
        #[must_use]
        pub fn dummy_limit(side: Side, price: u64, size: u64) -> Self {
            Self {
                key: BookEntryKey {
                    price: Some(Price(price)),
                    when_submitted: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
                    event_id: EventId(1),
                },
                client_request_id: ClientRequestId::random(),
                client: Client::dummy(),
                entry_type: EntryType::Limit,
                side,
                time_in_force: TimeInForce::GoodTillCancel,
                sizes: EntrySizes::new(size),
                status: EntryStatus::New,
            }
        }

        /// Same, for a specific client.
        #[must_use]
        pub fn dummy_limit_for(client: Client, side: Side, price: u64, size: u64) -> Self {
            Self {
                client,
                ..Self::dummy_limit(side, price, size)
            }
        }
    }
}
