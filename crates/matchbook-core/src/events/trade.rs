//! Trade events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use matchbook_types::{BookId, EventId, Price, Result, TradeSideEntry};

use crate::books::Books;
use crate::transaction::Transaction;

/// A fill between an aggressor and a passive entry.
///
/// Carries both sides' post-trade snapshots so the sizing mutation can be
/// re-applied from the event alone: each snapshot identifies its entry by
/// the original key, and the side whose entry is no longer (or never was)
/// on the book — the in-flight aggressor — applies as a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    pub event_id: EventId,
    pub book_id: BookId,
    pub size: u64,
    pub price: Price,
    pub when_happened: DateTime<Utc>,
    pub aggressor: TradeSideEntry,
    pub passive: TradeSideEntry,
}

impl TradeEvent {
    pub(crate) fn play(&self, books: &Books) -> Result<Transaction> {
        let event_id = books.verify_event_id(self.event_id)?;
        Ok(Transaction::new(
            books
                .with_event_id(event_id)
                .traded(&self.aggressor)
                .traded(&self.passive),
        ))
    }
}
