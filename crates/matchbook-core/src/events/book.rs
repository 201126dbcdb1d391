//! Book lifecycle and mutation events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use matchbook_types::{BookEntry, BookId, EventId, Result, Side, TradingStatuses};

use crate::books::Books;
use crate::limit_book::LimitBook;
use crate::transaction::Transaction;

/// A `Books` aggregate came into existence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooksCreatedEvent {
    pub book_id: BookId,
    pub event_id: EventId,
    pub business_date: NaiveDate,
    pub trading_statuses: TradingStatuses,
}

impl BooksCreatedEvent {
    pub(crate) fn play(&self, books: &Books) -> Result<Transaction> {
        let event_id = books.verify_event_id(self.event_id)?;
        Ok(Transaction::new(Books {
            book_id: self.book_id.clone(),
            business_date: self.business_date,
            trading_statuses: self.trading_statuses,
            last_event_id: event_id,
            buy_limit_book: LimitBook::new(Side::Buy),
            sell_limit_book: LimitBook::new(Side::Sell),
        }))
    }
}

/// An entry started resting on its side's book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryAddedToBookEvent {
    pub book_id: BookId,
    pub event_id: EventId,
    pub entry: BookEntry,
}

impl EntryAddedToBookEvent {
    pub(crate) fn play(&self, books: &Books) -> Result<Transaction> {
        let event_id = books.verify_event_id(self.event_id)?;
        Ok(Transaction::new(
            books.with_event_id(event_id).add_book_entry(&self.entry),
        ))
    }
}

/// One or more entries stopped resting — fully filled entries leave via
/// trade application; this event is the explicit removal path (mass-quote
/// cancel-and-replace).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntriesRemovedFromBookEvent {
    pub book_id: BookId,
    pub event_id: EventId,
    pub entries: Vec<BookEntry>,
}

impl EntriesRemovedFromBookEvent {
    pub(crate) fn play(&self, books: &Books) -> Result<Transaction> {
        let event_id = books.verify_event_id(self.event_id)?;
        Ok(Transaction::new(
            books.with_event_id(event_id).remove_book_entries(&self.entries),
        ))
    }
}
