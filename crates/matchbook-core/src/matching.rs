//! The price/time-priority matching pipeline.
//!
//! An aggressor entry walks the opposite book in priority order, trading
//! against each matchable passive until its size is exhausted, the book
//! runs dry, or no further match exists. Each fill is recorded as a trade
//! event and played immediately, so the book the next iteration sees is
//! already post-trade — the loop never observes a stale passive.

use matchbook_types::{BookEntry, Price, Result};

use crate::books::Books;
use crate::events::{Event, TradeEvent};
use crate::rules::{find_trade_price, is_wash_trade, trade_size};
use crate::time_in_force::finalise;
use crate::transaction::Transaction;

/// A matchable passive entry and the price the pair would trade at.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub passive: BookEntry,
    pub trade_price: Price,
}

/// The outcome of matching: the (possibly further-traded) aggressor and
/// the transaction accumulated along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub aggressor: BookEntry,
    pub transaction: Transaction,
}

/// Match `aggressor` against the opposite book until exhausted.
///
/// The loop terminates because every iteration either strictly reduces the
/// aggressor's available size or strictly shrinks the opposite book (a
/// zero-size trade is impossible: both sides of a match have positive
/// availability).
pub fn match_entry(aggressor: BookEntry, books: &Books) -> Result<MatchResult> {
    let mut aggressor = aggressor;
    let mut transaction = Transaction::new(books.clone());

    loop {
        let passives = transaction.aggregate.opposite_side_book(aggressor.side);
        if aggressor.sizes.available == 0 || passives.is_empty() {
            break;
        }
        let Some(next_match) = find_next_match(&aggressor, passives.entries()) else {
            break;
        };

        let size = trade_size(&aggressor.sizes, &next_match.passive.sizes);
        let traded_aggressor = aggressor.traded(size);
        let traded_passive = next_match.passive.traded(size);

        tracing::debug!(
            book_id = %transaction.aggregate.book_id,
            price = %next_match.trade_price,
            size,
            remaining = traded_aggressor.sizes.available,
            "fill"
        );

        let event = TradeEvent {
            event_id: transaction.aggregate.last_event_id.next(),
            book_id: transaction.aggregate.book_id.clone(),
            size,
            price: next_match.trade_price,
            when_happened: aggressor.key.when_submitted,
            aggressor: traded_aggressor.to_trade_side_entry(),
            passive: traded_passive.to_trade_side_entry(),
        };
        transaction = transaction.then_play(Event::Trade(event))?;
        aggressor = traded_aggressor;
    }

    Ok(MatchResult {
        aggressor,
        transaction,
    })
}

/// The first passive the aggressor may trade with, scanning in priority
/// order.
///
/// Candidates are *skipped* (the scan continues) when no trade price is
/// determinable for the pair at all — both sides priceless — or when the
/// pair would be a wash trade. A candidate whose price simply does not
/// cross *ends* the scan: passives are best-price-first, so every later
/// candidate is no better.
#[must_use]
pub fn find_next_match(aggressor: &BookEntry, passives: &[BookEntry]) -> Option<Match> {
    for passive in passives {
        if aggressor.key.price.is_none() && passive.key.price.is_none() {
            continue;
        }
        if is_wash_trade(&aggressor.client, &passive.client) {
            continue;
        }
        let trade_price = find_trade_price(aggressor.side, aggressor.key.price, passive.key.price)?;
        return Some(Match {
            passive: passive.clone(),
            trade_price,
        });
    }
    None
}

/// The full pipeline for one incoming entry: match, then finalise the
/// remainder per its time-in-force.
pub fn match_and_place_entry(entry: BookEntry, books: &Books) -> Result<Transaction> {
    finalise(match_entry(entry, books)?)
}

#[cfg(test)]
mod tests {
    use matchbook_types::{BookId, Client, EntryStatus, EventId, Side};

    use super::*;

    fn books() -> Books {
        Books::new(BookId::new("XBT-LDN"))
    }

    fn firm(firm: &str, client: &str) -> Client {
        Client::new(firm, Some(client.into()))
    }

    fn resting(books: &Books, entry: &BookEntry) -> Books {
        books
            .add_book_entry(entry)
            .with_event_id(books.last_event_id.next())
    }

    fn trades(transaction: &Transaction) -> Vec<(u64, u64)> {
        transaction
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Trade(t) => Some((t.size, t.price.0)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_opposite_book_matches_nothing() {
        let aggressor = BookEntry::dummy_limit(Side::Buy, 15, 10);
        let result = match_entry(aggressor.clone(), &books()).unwrap();
        assert_eq!(result.aggressor, aggressor);
        assert!(result.transaction.events.is_empty());
    }

    #[test]
    fn exact_cross_fills_both_sides() {
        let passive = BookEntry::dummy_limit_for(firm("F1", "A"), Side::Sell, 10, 4);
        let books = resting(&books(), &passive);

        let aggressor = BookEntry::dummy_limit_for(firm("F2", "B"), Side::Buy, 10, 4);
        let result = match_entry(aggressor, &books).unwrap();

        assert_eq!(trades(&result.transaction), vec![(4, 10)]);
        assert_eq!(result.aggressor.status, EntryStatus::Filled);
        assert!(result.transaction.aggregate.sell_limit_book.is_empty());
    }

    #[test]
    fn partial_fill_leaves_the_passive_resting() {
        let passive = BookEntry::dummy_limit_for(firm("F1", "A"), Side::Sell, 10, 5);
        let books = resting(&books(), &passive);

        let aggressor = BookEntry::dummy_limit_for(firm("F2", "B"), Side::Buy, 10, 2);
        let result = match_entry(aggressor, &books).unwrap();

        assert_eq!(trades(&result.transaction), vec![(2, 10)]);
        let remaining = result.transaction.aggregate.sell_limit_book.best().unwrap();
        assert_eq!(remaining.sizes.available, 3);
        assert_eq!(remaining.status, EntryStatus::PartialFill);
    }

    #[test]
    fn walks_multiple_levels_best_price_first() {
        let mut cheap = BookEntry::dummy_limit_for(firm("F1", "A"), Side::Sell, 8, 5);
        cheap.key.event_id = EventId(1);
        let mut dear = BookEntry::dummy_limit_for(firm("F1", "A"), Side::Sell, 10, 3);
        dear.key.event_id = EventId(2);
        let books = resting(&resting(&books(), &cheap), &dear);

        let aggressor = BookEntry::dummy_limit_for(firm("F2", "B"), Side::Buy, 10, 11);
        let result = match_entry(aggressor, &books).unwrap();

        assert_eq!(trades(&result.transaction), vec![(5, 8), (3, 10)]);
        assert_eq!(result.aggressor.sizes.available, 3);
        assert!(result.transaction.aggregate.sell_limit_book.is_empty());
    }

    #[test]
    fn trade_events_carry_sequential_ids() {
        let mut first = BookEntry::dummy_limit_for(firm("F1", "A"), Side::Sell, 8, 5);
        first.key.event_id = EventId(1);
        let mut second = BookEntry::dummy_limit_for(firm("F1", "A"), Side::Sell, 10, 3);
        second.key.event_id = EventId(2);
        let books = resting(&resting(&books(), &first), &second);

        let aggressor = BookEntry::dummy_limit_for(firm("F2", "B"), Side::Buy, 10, 8);
        let result = match_entry(aggressor, &books).unwrap();

        let ids: Vec<EventId> = result.transaction.events.iter().map(Event::event_id).collect();
        assert_eq!(ids, vec![EventId(3), EventId(4)]);
        assert_eq!(result.transaction.aggregate.last_event_id, EventId(4));
    }

    #[test]
    fn wash_pair_is_skipped_in_favour_of_the_next_passive() {
        let own = firm("F1", "A");
        let mut own_offer = BookEntry::dummy_limit_for(own.clone(), Side::Sell, 10, 5);
        own_offer.key.event_id = EventId(1);
        let mut other_offer = BookEntry::dummy_limit_for(firm("F2", "B"), Side::Sell, 10, 5);
        other_offer.key.event_id = EventId(2);
        let books = resting(&resting(&books(), &own_offer), &other_offer);

        let aggressor = BookEntry::dummy_limit_for(own, Side::Buy, 10, 5);
        let result = match_entry(aggressor, &books).unwrap();

        assert_eq!(trades(&result.transaction), vec![(5, 10)]);
        // The wash candidate is untouched, the other offer is gone.
        let survivor = result.transaction.aggregate.sell_limit_book.best().unwrap();
        assert_eq!(survivor.key.event_id, EventId(1));
        assert_eq!(survivor.sizes.available, 5);
    }

    #[test]
    fn same_firm_missing_attribution_never_trades() {
        let passive = BookEntry::dummy_limit_for(Client::new("F1", None), Side::Sell, 10, 5);
        let books = resting(&books(), &passive);

        let aggressor = BookEntry::dummy_limit_for(firm("F1", "A"), Side::Buy, 12, 5);
        let result = match_entry(aggressor, &books).unwrap();
        assert!(trades(&result.transaction).is_empty());
        assert_eq!(result.aggressor.sizes.available, 5);
    }

    #[test]
    fn market_aggressor_takes_the_resting_price() {
        let passive = BookEntry::dummy_limit_for(firm("F1", "A"), Side::Sell, 8, 5);
        let books = resting(&books(), &passive);

        let mut aggressor = BookEntry::dummy_limit_for(firm("F2", "B"), Side::Buy, 0, 3);
        aggressor.key.price = None;
        let result = match_entry(aggressor, &books).unwrap();
        assert_eq!(trades(&result.transaction), vec![(3, 8)]);
    }

    #[test]
    fn market_against_market_is_skipped_not_traded() {
        let mut market_passive = BookEntry::dummy_limit_for(firm("F1", "A"), Side::Sell, 0, 5);
        market_passive.key.price = None;
        market_passive.key.event_id = EventId(1);
        let mut priced_passive = BookEntry::dummy_limit_for(firm("F1", "A"), Side::Sell, 9, 5);
        priced_passive.key.event_id = EventId(2);
        let books = resting(&resting(&books(), &market_passive), &priced_passive);

        let mut aggressor = BookEntry::dummy_limit_for(firm("F2", "B"), Side::Buy, 0, 5);
        aggressor.key.price = None;
        let result = match_entry(aggressor, &books).unwrap();

        // The market passive cannot price a trade; the priced one can.
        assert_eq!(trades(&result.transaction), vec![(5, 9)]);
    }

    #[test]
    fn non_crossing_best_price_ends_the_scan() {
        let passive = BookEntry::dummy_limit_for(firm("F1", "A"), Side::Sell, 10, 5);
        let books = resting(&books(), &passive);

        let aggressor = BookEntry::dummy_limit_for(firm("F2", "B"), Side::Buy, 9, 5);
        assert!(find_next_match(&aggressor, books.sell_limit_book.entries()).is_none());

        let result = match_entry(aggressor, &books).unwrap();
        assert!(trades(&result.transaction).is_empty());
    }

    #[test]
    fn stops_at_the_first_non_crossing_level() {
        let mut near = BookEntry::dummy_limit_for(firm("F1", "A"), Side::Sell, 10, 2);
        near.key.event_id = EventId(1);
        let mut far = BookEntry::dummy_limit_for(firm("F1", "A"), Side::Sell, 12, 9);
        far.key.event_id = EventId(2);
        let books = resting(&resting(&books(), &near), &far);

        let aggressor = BookEntry::dummy_limit_for(firm("F2", "B"), Side::Buy, 11, 6);
        let result = match_entry(aggressor, &books).unwrap();

        assert_eq!(trades(&result.transaction), vec![(2, 10)]);
        assert_eq!(result.aggressor.sizes.available, 4);
        // The 12-level is untouched.
        assert_eq!(result.transaction.aggregate.sell_limit_book.len(), 1);
    }
}
