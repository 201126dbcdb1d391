//! Mass-quote model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    BookEntry, BookEntryKey, Client, ClientRequestId, EntrySizes, EntryStatus, EntryType, EventId,
    PriceWithSize, Side, TimeInForce,
};

/// How the legs of a mass quote are interpreted. Only single-sided
/// price/size pairs are supported; spread- and depth-relative models belong
/// to the excluded front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteModelType {
    QuoteEntry,
}

impl fmt::Display for QuoteModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuoteEntry => write!(f, "QUOTE_ENTRY"),
        }
    }
}

/// One two-sided mass-quote leg: an optional bid and an optional offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteEntry {
    pub quote_entry_id: String,
    pub quote_set_id: String,
    pub bid: Option<PriceWithSize>,
    pub offer: Option<PriceWithSize>,
}

impl QuoteEntry {
    #[must_use]
    pub fn new(
        quote_entry_id: impl Into<String>,
        quote_set_id: impl Into<String>,
        bid: Option<PriceWithSize>,
        offer: Option<PriceWithSize>,
    ) -> Self {
        Self {
            quote_entry_id: quote_entry_id.into(),
            quote_set_id: quote_set_id.into(),
            bid,
            offer,
        }
    }

    /// Expand into synthetic book entries, bid before offer.
    ///
    /// Each leg becomes an independent one-sided aggressor keyed by the
    /// mass-quote event: its request id carries the quote id as parent
    /// (that link drives cancel-and-replace), and its key's event id is the
    /// placing event's.
    #[must_use]
    pub fn to_book_entries(
        &self,
        quote_id: &str,
        who_requested: &Client,
        time_in_force: TimeInForce,
        when_submitted: DateTime<Utc>,
        event_id: EventId,
    ) -> Vec<BookEntry> {
        let mut entries = Vec::with_capacity(2);
        if let Some(bid) = self.bid {
            entries.push(self.leg_entry(
                bid,
                Side::Buy,
                quote_id,
                who_requested,
                time_in_force,
                when_submitted,
                event_id,
            ));
        }
        if let Some(offer) = self.offer {
            entries.push(self.leg_entry(
                offer,
                Side::Sell,
                quote_id,
                who_requested,
                time_in_force,
                when_submitted,
                event_id,
            ));
        }
        entries
    }

    #[allow(clippy::too_many_arguments)]
    fn leg_entry(
        &self,
        leg: PriceWithSize,
        side: Side,
        quote_id: &str,
        who_requested: &Client,
        time_in_force: TimeInForce,
        when_submitted: DateTime<Utc>,
        event_id: EventId,
    ) -> BookEntry {
        BookEntry {
            key: BookEntryKey {
                price: Some(leg.price),
                when_submitted,
                event_id,
            },
            client_request_id: ClientRequestId::derived(self.quote_entry_id.clone(), quote_id),
            client: who_requested.clone(),
            entry_type: EntryType::Limit,
            side,
            time_in_force,
            sizes: EntrySizes::new(leg.size),
            status: EntryStatus::New,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::Price;

    fn when() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn expands_bid_before_offer() {
        let quote = QuoteEntry::new(
            "leg-1",
            "set-1",
            Some(PriceWithSize::new(Price(10), 4)),
            Some(PriceWithSize::new(Price(11), 4)),
        );
        let entries =
            quote.to_book_entries("q-1", &Client::dummy(), TimeInForce::GoodTillCancel, when(), EventId(1));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].side, Side::Buy);
        assert_eq!(entries[0].key.price, Some(Price(10)));
        assert_eq!(entries[1].side, Side::Sell);
        assert_eq!(entries[1].key.price, Some(Price(11)));
    }

    #[test]
    fn one_sided_quote_expands_to_one_entry() {
        let quote = QuoteEntry::new("leg-1", "set-1", Some(PriceWithSize::new(Price(10), 4)), None);
        let entries =
            quote.to_book_entries("q-1", &Client::dummy(), TimeInForce::GoodTillCancel, when(), EventId(1));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].side, Side::Buy);
    }

    #[test]
    fn legs_are_marked_as_quotes() {
        let quote = QuoteEntry::new("leg-1", "set-1", Some(PriceWithSize::new(Price(10), 4)), None);
        let entries =
            quote.to_book_entries("q-1", &Client::dummy(), TimeInForce::GoodTillCancel, when(), EventId(1));
        assert!(entries[0].is_quote());
        assert_eq!(entries[0].client_request_id.parent_id.as_deref(), Some("q-1"));
        assert_eq!(entries[0].key.event_id, EventId(1));
    }
}
