//! The `Books` aggregate: one instrument's pair of limit books.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use matchbook_types::{
    BookEntry, BookId, EventId, MatchbookError, Result, Side, TradeSideEntry, TradingStatus,
    TradingStatuses,
};

use crate::limit_book::LimitBook;

/// Aggregate root. `last_event_id` is the id of the most recently applied
/// event; every further event must carry its immediate successor. All
/// transitions return a new value — a prior snapshot stays valid for
/// whoever still holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Books {
    pub book_id: BookId,
    pub business_date: NaiveDate,
    pub trading_statuses: TradingStatuses,
    pub last_event_id: EventId,
    pub buy_limit_book: LimitBook,
    pub sell_limit_book: LimitBook,
}

impl Books {
    /// A blank aggregate awaiting its creation event. The business date
    /// and statuses are placeholders until `BooksCreatedEvent` plays.
    #[must_use]
    pub fn new(book_id: BookId) -> Self {
        Self {
            book_id,
            business_date: NaiveDate::default(),
            trading_statuses: TradingStatuses::new(TradingStatus::NotAvailableForTrading),
            last_event_id: EventId(0),
            buy_limit_book: LimitBook::new(Side::Buy),
            sell_limit_book: LimitBook::new(Side::Sell),
        }
    }

    /// Admit `event_id` iff it is the immediate successor of the last
    /// applied id. A gap or a replay is a consistency violation the engine
    /// must not paper over.
    pub fn verify_event_id(&self, event_id: EventId) -> Result<EventId> {
        if event_id.is_next_of(self.last_event_id) {
            Ok(event_id)
        } else {
            Err(MatchbookError::SequenceViolation {
                last: self.last_event_id,
                actual: event_id,
            })
        }
    }

    /// The aggregate with `last_event_id` advanced.
    #[must_use]
    pub fn with_event_id(&self, event_id: EventId) -> Self {
        Self {
            last_event_id: event_id,
            ..self.clone()
        }
    }

    /// The book entries of `side` rest on.
    #[must_use]
    pub fn same_side_book(&self, side: Side) -> &LimitBook {
        match side {
            Side::Buy => &self.buy_limit_book,
            Side::Sell => &self.sell_limit_book,
        }
    }

    /// The book an aggressor on `side` matches against.
    #[must_use]
    pub fn opposite_side_book(&self, side: Side) -> &LimitBook {
        self.same_side_book(side.opposite())
    }

    /// The aggregate with `entry` resting on its side's book.
    #[must_use]
    pub fn add_book_entry(&self, entry: &BookEntry) -> Self {
        self.replace_book(entry.side, self.same_side_book(entry.side).insert(entry.clone()))
    }

    /// The aggregate with every listed entry removed from its side's book.
    #[must_use]
    pub fn remove_book_entries(&self, entries: &[BookEntry]) -> Self {
        let mut books = self.clone();
        for entry in entries {
            books = books.replace_book(entry.side, books.same_side_book(entry.side).remove(&entry.key));
        }
        books
    }

    /// The aggregate after applying one side's recorded trade snapshot.
    #[must_use]
    pub fn traded(&self, snapshot: &TradeSideEntry) -> Self {
        self.replace_book(
            snapshot.side,
            self.same_side_book(snapshot.side).update_traded(snapshot),
        )
    }

    fn replace_book(&self, side: Side, book: LimitBook) -> Self {
        let mut books = self.clone();
        match side {
            Side::Buy => books.buy_limit_book = book,
            Side::Sell => books.sell_limit_book = book,
        }
        books
    }
}
