//! Mass-quote events: cancel-and-replace of a requester's quote set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use matchbook_types::{
    BookEntry, BookId, Client, EventId, QuoteEntry, QuoteModelType, RejectReason, Result,
    TimeInForce,
};

use crate::books::Books;
use crate::events::{EntriesRemovedFromBookEvent, Event};
use crate::matching::match_and_place_entry;
use crate::transaction::Transaction;

/// A mass quote replaced the requester's standing quotes.
///
/// Playing it (1) cancels every resting entry of the requester that was
/// derived from a quote, as one removal event, then (2) places each new
/// leg — bid before offer, in quote-entry order — through the full
/// match-then-finalise pipeline, folding sub-transactions left to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassQuotePlacedEvent {
    pub event_id: EventId,
    pub quote_id: String,
    pub who_requested: Client,
    pub book_id: BookId,
    pub quote_model_type: QuoteModelType,
    pub time_in_force: TimeInForce,
    pub entries: Vec<QuoteEntry>,
    pub when_happened: DateTime<Utc>,
}

impl MassQuotePlacedEvent {
    /// Every synthetic aggressor this quote set expands to, bid before
    /// offer within each quote entry, keyed by this event.
    #[must_use]
    pub fn to_book_entries(&self) -> Vec<BookEntry> {
        self.entries
            .iter()
            .flat_map(|entry| {
                entry.to_book_entries(
                    &self.quote_id,
                    &self.who_requested,
                    self.time_in_force,
                    self.when_happened,
                    self.event_id,
                )
            })
            .collect()
    }

    pub(crate) fn play(&self, books: &Books) -> Result<Transaction> {
        let event_id = books.verify_event_id(self.event_id)?;
        let books = books.with_event_id(event_id);

        let mut transaction = match cancel_existing_quotes(&books, &self.who_requested) {
            Some(event) => Transaction::new(books).then_play(Event::EntriesRemoved(event))?,
            None => Transaction::new(books),
        };

        for entry in self.to_book_entries() {
            let placed = match_and_place_entry(entry, &transaction.aggregate)?;
            transaction = transaction.append(placed);
        }
        Ok(transaction)
    }
}

/// A mass quote failed validation wholesale. Advances the sequence only;
/// no leg touches the book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassQuoteRejectedEvent {
    pub event_id: EventId,
    pub quote_id: String,
    pub who_requested: Client,
    pub book_id: BookId,
    pub quote_model_type: QuoteModelType,
    pub time_in_force: TimeInForce,
    pub entries: Vec<QuoteEntry>,
    pub when_happened: DateTime<Utc>,
    pub reject_reason: RejectReason,
    pub reject_text: Option<String>,
}

impl MassQuoteRejectedEvent {
    pub(crate) fn play(&self, books: &Books) -> Result<Transaction> {
        let event_id = books.verify_event_id(self.event_id)?;
        Ok(Transaction::new(books.with_event_id(event_id)))
    }
}

/// The removal event cancelling all resting quote entries of `client`,
/// or `None` when there is nothing to cancel. Each cancelled entry records
/// its remainder moved from available to cancelled.
#[must_use]
pub fn cancel_existing_quotes(
    books: &Books,
    client: &Client,
) -> Option<EntriesRemovedFromBookEvent> {
    let cancelled: Vec<BookEntry> = books
        .buy_limit_book
        .entries()
        .iter()
        .chain(books.sell_limit_book.entries())
        .filter(|entry| entry.is_quote() && entry.client == *client)
        .map(BookEntry::cancelled)
        .collect();

    (!cancelled.is_empty()).then(|| EntriesRemovedFromBookEvent {
        book_id: books.book_id.clone(),
        event_id: books.last_event_id.next(),
        entries: cancelled,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use matchbook_types::{ClientRequestId, EntryStatus, Price, PriceWithSize, Side};

    use super::*;

    fn book_id() -> BookId {
        BookId::new("XBT-LDN")
    }

    fn when() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn quote_event(event_id: u64, client: Client, legs: Vec<QuoteEntry>) -> MassQuotePlacedEvent {
        MassQuotePlacedEvent {
            event_id: EventId(event_id),
            quote_id: format!("quote-{event_id}"),
            who_requested: client,
            book_id: book_id(),
            quote_model_type: QuoteModelType::QuoteEntry,
            time_in_force: TimeInForce::GoodTillCancel,
            entries: legs,
            when_happened: when(),
        }
    }

    fn two_sided(leg: u32, bid: (u64, u64), offer: (u64, u64)) -> QuoteEntry {
        QuoteEntry::new(
            format!("leg-{leg}"),
            "set-1",
            Some(PriceWithSize::new(Price(bid.1), bid.0)),
            Some(PriceWithSize::new(Price(offer.1), offer.0)),
        )
    }

    #[test]
    fn quote_set_placed_on_empty_book_rests_all_legs() {
        let event = quote_event(
            1,
            Client::dummy(),
            vec![two_sided(1, (4, 10), (4, 11)), two_sided(2, (5, 9), (5, 12))],
        );
        let txn = event.play(&Books::new(book_id())).unwrap();

        // Four entry-added side effects, ids 2..=5.
        assert_eq!(txn.events.len(), 4);
        assert_eq!(txn.aggregate.last_event_id, EventId(5));
        assert_eq!(txn.aggregate.buy_limit_book.len(), 2);
        assert_eq!(txn.aggregate.sell_limit_book.len(), 2);
        // Best bid 10, best offer 11.
        assert_eq!(
            txn.aggregate.buy_limit_book.best().unwrap().key.price,
            Some(Price(10))
        );
        assert_eq!(
            txn.aggregate.sell_limit_book.best().unwrap().key.price,
            Some(Price(11))
        );
    }

    #[test]
    fn replacement_cancels_prior_quotes_first() {
        let client = Client::dummy();
        let first = quote_event(1, client.clone(), vec![two_sided(1, (4, 10), (4, 11))]);
        let after_first = first.play(&Books::new(book_id())).unwrap().aggregate;

        let second = quote_event(4, client, vec![two_sided(1, (6, 9), (6, 12))]);
        let txn = second.play(&after_first).unwrap();

        // First side effect is one removal covering both old legs.
        let Event::EntriesRemoved(removed) = &txn.events[0] else {
            panic!("expected removal first, got {:?}", txn.events[0]);
        };
        assert_eq!(removed.entries.len(), 2);
        for entry in &removed.entries {
            assert_eq!(entry.status, EntryStatus::Cancelled);
            assert_eq!(entry.sizes.available, 0);
            assert_eq!(entry.sizes.cancelled, 4);
        }

        // Old legs gone, new legs resting.
        assert_eq!(txn.aggregate.buy_limit_book.len(), 1);
        assert_eq!(txn.aggregate.sell_limit_book.len(), 1);
        assert_eq!(
            txn.aggregate.buy_limit_book.best().unwrap().key.price,
            Some(Price(9))
        );
    }

    #[test]
    fn replacement_leaves_other_requesters_quotes_alone() {
        let maker_a = Client::new("FIRM-A", Some("MM1".into()));
        let maker_b = Client::new("FIRM-B", Some("MM2".into()));

        let books = quote_event(1, maker_a, vec![two_sided(1, (4, 10), (4, 11))])
            .play(&Books::new(book_id()))
            .unwrap()
            .aggregate;
        let txn = quote_event(4, maker_b.clone(), vec![two_sided(1, (5, 9), (5, 12))])
            .play(&books)
            .unwrap();

        assert!(cancel_existing_quotes(&Books::new(book_id()), &maker_b).is_none());
        // No removal event: B had nothing resting.
        assert!(txn.events.iter().all(|e| !matches!(e, Event::EntriesRemoved(_))));
        assert_eq!(txn.aggregate.buy_limit_book.len(), 2);
    }

    #[test]
    fn plain_orders_are_not_cancelled_as_quotes() {
        let client = Client::dummy();
        let mut order = BookEntry::dummy_limit_for(client.clone(), Side::Buy, 10, 4);
        order.client_request_id = ClientRequestId::new("plain-order");
        let books = Books::new(book_id()).add_book_entry(&order).with_event_id(EventId(1));

        assert!(cancel_existing_quotes(&books, &client).is_none());
    }

    #[test]
    fn own_quote_legs_do_not_cross_each_other() {
        // A locked quote (bid 10 / offer 10) from one requester must rest
        // both legs rather than self-trade.
        let event = quote_event(1, Client::dummy(), vec![two_sided(1, (4, 10), (4, 10))]);
        let txn = event.play(&Books::new(book_id())).unwrap();
        assert_eq!(txn.aggregate.buy_limit_book.len(), 1);
        assert_eq!(txn.aggregate.sell_limit_book.len(), 1);
        assert!(txn.events.iter().all(|e| !matches!(e, Event::Trade(_))));
    }
}
