//! The event model: every state transition of a `Books` aggregate is an
//! event, and every event is independently replayable through [`Event::play`].
//!
//! Events split into two kinds. A **primary** event is the direct response
//! to a command. A **side-effect** event is generated while playing another
//! event; during recovery side effects are not re-applied, because
//! replaying their primary regenerates them deterministically.

mod book;
mod order;
mod quote;
mod trade;

pub use book::{BooksCreatedEvent, EntriesRemovedFromBookEvent, EntryAddedToBookEvent};
pub use order::{OrderCancelledEvent, OrderPlacedEvent, OrderRejectedEvent};
pub use quote::{MassQuotePlacedEvent, MassQuoteRejectedEvent, cancel_existing_quotes};
pub use trade::TradeEvent;

use serde::{Deserialize, Serialize};

use matchbook_types::{BookId, EventId, Result};

use crate::books::Books;
use crate::transaction::Transaction;

/// Whether an event responds to a command or was generated while playing
/// another event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Primary,
    SideEffect,
}

/// Everything the engine can record in a book's event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    BooksCreated(BooksCreatedEvent),
    OrderPlaced(OrderPlacedEvent),
    OrderRejected(OrderRejectedEvent),
    OrderCancelled(OrderCancelledEvent),
    MassQuotePlaced(MassQuotePlacedEvent),
    MassQuoteRejected(MassQuoteRejectedEvent),
    Trade(TradeEvent),
    EntryAdded(EntryAddedToBookEvent),
    EntriesRemoved(EntriesRemovedFromBookEvent),
}

impl Event {
    #[must_use]
    pub fn event_id(&self) -> EventId {
        match self {
            Self::BooksCreated(e) => e.event_id,
            Self::OrderPlaced(e) => e.event_id,
            Self::OrderRejected(e) => e.event_id,
            Self::OrderCancelled(e) => e.event_id,
            Self::MassQuotePlaced(e) => e.event_id,
            Self::MassQuoteRejected(e) => e.event_id,
            Self::Trade(e) => e.event_id,
            Self::EntryAdded(e) => e.event_id,
            Self::EntriesRemoved(e) => e.event_id,
        }
    }

    #[must_use]
    pub fn book_id(&self) -> &BookId {
        match self {
            Self::BooksCreated(e) => &e.book_id,
            Self::OrderPlaced(e) => &e.book_id,
            Self::OrderRejected(e) => &e.book_id,
            Self::OrderCancelled(e) => &e.book_id,
            Self::MassQuotePlaced(e) => &e.book_id,
            Self::MassQuoteRejected(e) => &e.book_id,
            Self::Trade(e) => &e.book_id,
            Self::EntryAdded(e) => &e.book_id,
            Self::EntriesRemoved(e) => &e.book_id,
        }
    }

    #[must_use]
    pub fn event_type(&self) -> EventType {
        match self {
            Self::BooksCreated(_)
            | Self::OrderPlaced(_)
            | Self::OrderRejected(_)
            | Self::MassQuotePlaced(_)
            | Self::MassQuoteRejected(_) => EventType::Primary,
            Self::OrderCancelled(_)
            | Self::Trade(_)
            | Self::EntryAdded(_)
            | Self::EntriesRemoved(_) => EventType::SideEffect,
        }
    }

    /// Apply this event to `books`: the new aggregate plus any side-effect
    /// events generated along the way. Fails with a sequence violation
    /// when the event id is not the immediate successor of the aggregate's
    /// last — a gap, a replay, or a lost write race, none of which the
    /// engine will repair.
    pub fn play(&self, books: &Books) -> Result<Transaction> {
        match self {
            Self::BooksCreated(e) => e.play(books),
            Self::OrderPlaced(e) => e.play(books),
            Self::OrderRejected(e) => e.play(books),
            Self::OrderCancelled(e) => e.play(books),
            Self::MassQuotePlaced(e) => e.play(books),
            Self::MassQuoteRejected(e) => e.play(books),
            Self::Trade(e) => e.play(books),
            Self::EntryAdded(e) => e.play(books),
            Self::EntriesRemoved(e) => e.play(books),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_side_effect_split() {
        let reject = Event::OrderRejected(OrderRejectedEvent::dummy(BookId::new("A"), EventId(1)));
        assert_eq!(reject.event_type(), EventType::Primary);
        assert_eq!(reject.event_id(), EventId(1));
        assert_eq!(reject.book_id(), &BookId::new("A"));
    }

    #[test]
    fn event_serde_roundtrip() {
        let event = Event::OrderRejected(OrderRejectedEvent::dummy(BookId::new("A"), EventId(7)));
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
