//! Order lifecycle events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use matchbook_types::{
    BookEntry, BookEntryKey, BookId, Client, ClientRequestId, EntrySizes, EntryStatus, EntryType,
    EventId, Price, RejectReason, Result, Side, TimeInForce,
};

use crate::books::Books;
use crate::matching::match_and_place_entry;
use crate::transaction::Transaction;

/// An order passed validation and entered the engine. Playing it runs the
/// full match-then-finalise pipeline; the net effect ranges from fully
/// traded through partially rested to untouched-and-rested (or an IOC
/// remainder cancelled).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPlacedEvent {
    pub event_id: EventId,
    pub request_id: ClientRequestId,
    pub who_requested: Client,
    pub book_id: BookId,
    pub entry_type: EntryType,
    pub side: Side,
    pub sizes: EntrySizes,
    pub price: Option<Price>,
    pub time_in_force: TimeInForce,
    pub when_happened: DateTime<Utc>,
}

impl OrderPlacedEvent {
    /// The aggressor entry this placement introduces. Its key keeps the
    /// placing event's id — that id is the priority tie-break for as long
    /// as the entry rests.
    #[must_use]
    pub fn to_book_entry(&self) -> BookEntry {
        BookEntry {
            key: BookEntryKey {
                price: self.price,
                when_submitted: self.when_happened,
                event_id: self.event_id,
            },
            client_request_id: self.request_id.clone(),
            client: self.who_requested.clone(),
            entry_type: self.entry_type,
            side: self.side,
            time_in_force: self.time_in_force,
            sizes: self.sizes,
            status: EntryStatus::New,
        }
    }

    pub(crate) fn play(&self, books: &Books) -> Result<Transaction> {
        let event_id = books.verify_event_id(self.event_id)?;
        match_and_place_entry(self.to_book_entry(), &books.with_event_id(event_id))
    }
}

/// An order failed validation. Advances the sequence so the rejection is
/// part of the replayable record; mutates nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRejectedEvent {
    pub event_id: EventId,
    pub request_id: ClientRequestId,
    pub who_requested: Client,
    pub book_id: BookId,
    pub entry_type: EntryType,
    pub side: Side,
    pub size: u64,
    pub price: Option<Price>,
    pub time_in_force: TimeInForce,
    pub when_happened: DateTime<Utc>,
    pub reject_reason: RejectReason,
    pub reject_text: Option<String>,
}

impl OrderRejectedEvent {
    pub(crate) fn play(&self, books: &Books) -> Result<Transaction> {
        let event_id = books.verify_event_id(self.event_id)?;
        Ok(Transaction::new(books.with_event_id(event_id)))
    }
}

/// The exchange cancelled an unexecuted remainder (IOC finalisation).
/// The entry never rested, so playing only advances the sequence; the
/// payload records the final sizes for the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCancelledEvent {
    pub event_id: EventId,
    pub book_id: BookId,
    pub request_id: ClientRequestId,
    pub who_requested: Client,
    pub entry_type: EntryType,
    pub side: Side,
    pub sizes: EntrySizes,
    pub price: Option<Price>,
    pub time_in_force: TimeInForce,
    pub when_happened: DateTime<Utc>,
    pub status: EntryStatus,
}

impl OrderCancelledEvent {
    /// Cancel the remainder of an in-flight aggressor.
    #[must_use]
    pub fn for_remainder(entry: &BookEntry, book_id: BookId, event_id: EventId) -> Self {
        let cancelled = entry.cancelled();
        Self {
            event_id,
            book_id,
            request_id: cancelled.client_request_id,
            who_requested: cancelled.client,
            entry_type: cancelled.entry_type,
            side: cancelled.side,
            sizes: cancelled.sizes,
            price: cancelled.key.price,
            time_in_force: cancelled.time_in_force,
            when_happened: cancelled.key.when_submitted,
            status: cancelled.status,
        }
    }

    pub(crate) fn play(&self, books: &Books) -> Result<Transaction> {
        let event_id = books.verify_event_id(self.event_id)?;
        Ok(Transaction::new(books.with_event_id(event_id)))
    }
}

// Test fixtures, compiled for unit tests and for dependents enabling the
// `test-helpers` feature.
#[cfg(any(test, feature = "test-helpers"))]
mod fixtures {
    use chrono::{TimeZone, Utc};

    use matchbook_types::{
        Client, ClientRequestId, EntryType, EventId, RejectReason, Side, TimeInForce,
    };

    use super::{BookId, OrderRejectedEvent};

    impl OrderRejectedEvent {
        /// A minimal rejection event for sequencing tests.
        #[must_use]
        pub fn dummy(book_id: BookId, event_id: EventId) -> Self {
            Self {
                event_id,
                request_id: ClientRequestId::random(),
                who_requested: Client::dummy(),
                book_id,
                entry_type: EntryType::Limit,
                side: Side::Buy,
                size: 1,
                price: None,
                time_in_force: TimeInForce::GoodTillCancel,
                when_happened: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
                reject_reason: RejectReason::Other,
                reject_text: None,
            }
        }
    }
}
