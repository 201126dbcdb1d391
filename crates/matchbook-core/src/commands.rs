//! The command boundary: validate a request against current state and turn
//! it into a played primary event.
//!
//! Validation failures that concern an *existing* book are themselves
//! recorded — the command succeeds with a rejection event in its
//! transaction, so the refusal is part of the replayable log. Only
//! failures with no aggregate to log against (unknown book, duplicate
//! create) surface as errors.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use matchbook_types::{
    BookId, Client, ClientRequestId, EntrySizes, EntryType, MatchbookError, Price, QuoteEntry,
    QuoteModelType, RejectReason, Result, Side, TimeInForce, TradingStatus, TradingStatuses,
};

use crate::books::Books;
use crate::events::{
    BooksCreatedEvent, Event, MassQuotePlacedEvent, MassQuoteRejectedEvent, OrderPlacedEvent,
    OrderRejectedEvent,
};
use crate::transaction::Transaction;

/// Bring a new `Books` aggregate into existence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBooksCommand {
    pub book_id: BookId,
    pub business_date: NaiveDate,
    pub default_trading_status: TradingStatus,
}

impl CreateBooksCommand {
    pub fn execute(&self, books: Option<&Books>) -> Result<Transaction> {
        if books.is_some() {
            return Err(MatchbookError::BooksAlreadyExists(self.book_id.clone()));
        }
        let blank = Books::new(self.book_id.clone());
        let event = BooksCreatedEvent {
            book_id: self.book_id.clone(),
            event_id: blank.last_event_id.next(),
            business_date: self.business_date,
            trading_statuses: TradingStatuses::new(self.default_trading_status),
        };
        tracing::info!(book_id = %self.book_id, status = %self.default_trading_status, "books created");
        Transaction::new(blank).then_play(Event::BooksCreated(event))
    }
}

/// Place a single order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrderCommand {
    pub request_id: ClientRequestId,
    pub who_requested: Client,
    pub book_id: BookId,
    pub entry_type: EntryType,
    pub side: Side,
    pub size: u64,
    pub price: Option<Price>,
    pub time_in_force: TimeInForce,
    pub when_requested: DateTime<Utc>,
}

impl PlaceOrderCommand {
    pub fn execute(&self, books: Option<&Books>) -> Result<Transaction> {
        let books = books.ok_or_else(|| MatchbookError::UnknownBooks(self.book_id.clone()))?;

        if let Some((reason, text)) = self.rejection(books) {
            tracing::warn!(
                book_id = %self.book_id,
                request_id = %self.request_id,
                %reason,
                "order rejected"
            );
            let event = OrderRejectedEvent {
                event_id: books.last_event_id.next(),
                request_id: self.request_id.clone(),
                who_requested: self.who_requested.clone(),
                book_id: self.book_id.clone(),
                entry_type: self.entry_type,
                side: self.side,
                size: self.size,
                price: self.price,
                time_in_force: self.time_in_force,
                when_happened: self.when_requested,
                reject_reason: reason,
                reject_text: Some(text),
            };
            return Transaction::new(books.clone()).then_play(Event::OrderRejected(event));
        }

        let event = OrderPlacedEvent {
            event_id: books.last_event_id.next(),
            request_id: self.request_id.clone(),
            who_requested: self.who_requested.clone(),
            book_id: self.book_id.clone(),
            entry_type: self.entry_type,
            side: self.side,
            sizes: EntrySizes::new(self.size),
            price: self.price,
            time_in_force: self.time_in_force,
            when_happened: self.when_requested,
        };
        Transaction::new(books.clone()).then_play(Event::OrderPlaced(event))
    }

    fn rejection(&self, books: &Books) -> Option<(RejectReason, String)> {
        if self.size == 0 {
            return Some((
                RejectReason::IncorrectQuantity,
                "order size must be positive".into(),
            ));
        }
        let status = books.trading_statuses.effective();
        if !status.allows_placing() {
            return Some((
                RejectReason::ExchangeClosed,
                format!("book is not open for trading: {status}"),
            ));
        }
        match (self.entry_type, self.price) {
            (EntryType::Limit, None) => Some((
                RejectReason::UnsupportedOrderCharacteristic,
                "limit order without a price".into(),
            )),
            (EntryType::Market, Some(_)) => Some((
                RejectReason::UnsupportedOrderCharacteristic,
                "market order with a price".into(),
            )),
            _ => None,
        }
    }
}

/// Establish or replace a requester's quote set in one command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceMassQuoteCommand {
    pub quote_id: String,
    pub book_id: BookId,
    pub who_requested: Client,
    pub quote_model_type: QuoteModelType,
    pub time_in_force: TimeInForce,
    pub entries: Vec<QuoteEntry>,
    pub when_requested: DateTime<Utc>,
}

impl PlaceMassQuoteCommand {
    pub fn execute(&self, books: Option<&Books>) -> Result<Transaction> {
        let books = books.ok_or_else(|| MatchbookError::UnknownBooks(self.book_id.clone()))?;

        if let Some((reason, text)) = self.rejection(books) {
            tracing::warn!(
                book_id = %self.book_id,
                quote_id = %self.quote_id,
                %reason,
                "mass quote rejected"
            );
            let event = MassQuoteRejectedEvent {
                event_id: books.last_event_id.next(),
                quote_id: self.quote_id.clone(),
                who_requested: self.who_requested.clone(),
                book_id: self.book_id.clone(),
                quote_model_type: self.quote_model_type,
                time_in_force: self.time_in_force,
                entries: self.entries.clone(),
                when_happened: self.when_requested,
                reject_reason: reason,
                reject_text: Some(text),
            };
            return Transaction::new(books.clone()).then_play(Event::MassQuoteRejected(event));
        }

        let event = MassQuotePlacedEvent {
            event_id: books.last_event_id.next(),
            quote_id: self.quote_id.clone(),
            who_requested: self.who_requested.clone(),
            book_id: self.book_id.clone(),
            quote_model_type: self.quote_model_type,
            time_in_force: self.time_in_force,
            entries: self.entries.clone(),
            when_happened: self.when_requested,
        };
        Transaction::new(books.clone()).then_play(Event::MassQuotePlaced(event))
    }

    // A quote set is all-or-nothing: one bad leg rejects the whole set.
    fn rejection(&self, books: &Books) -> Option<(RejectReason, String)> {
        let status = books.trading_statuses.effective();
        if !status.allows_placing() {
            return Some((
                RejectReason::ExchangeClosed,
                format!("book is not open for trading: {status}"),
            ));
        }
        let bad_leg = self
            .entries
            .iter()
            .flat_map(|entry| entry.bid.iter().chain(entry.offer.iter()))
            .any(|leg| leg.size == 0);
        if bad_leg {
            return Some((
                RejectReason::IncorrectQuantity,
                "every quote leg size must be positive".into(),
            ));
        }
        None
    }
}
