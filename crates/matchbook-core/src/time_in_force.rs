//! Time-in-force finalisation: what happens to an aggressor's remainder
//! once matching has run its course.

use matchbook_types::{Result, TimeInForce};

use crate::events::{EntryAddedToBookEvent, Event, OrderCancelledEvent};
use crate::matching::MatchResult;
use crate::transaction::Transaction;

/// Finalise a match result per the aggressor's time-in-force.
///
/// - `GoodTillCancel`: a positive remainder rests on the book (one more
///   event plus the insert); a fully traded aggressor needs nothing.
/// - `ImmediateOrCancel`: never rests; a positive remainder is cancelled
///   by the exchange as a recorded side effect.
///
/// Adding a further policy (e.g. fill-or-kill) is one more arm deciding
/// between resting, cancelling, or unwinding the transaction.
pub fn finalise(result: MatchResult) -> Result<Transaction> {
    let MatchResult {
        aggressor,
        transaction,
    } = result;

    match aggressor.time_in_force {
        TimeInForce::GoodTillCancel => {
            if aggressor.time_in_force.can_stay_on_book(&aggressor.sizes) {
                let event = EntryAddedToBookEvent {
                    book_id: transaction.aggregate.book_id.clone(),
                    event_id: transaction.aggregate.last_event_id.next(),
                    entry: aggressor,
                };
                transaction.then_play(Event::EntryAdded(event))
            } else {
                Ok(transaction)
            }
        }
        TimeInForce::ImmediateOrCancel => {
            if aggressor.sizes.available > 0 {
                let event = OrderCancelledEvent::for_remainder(
                    &aggressor,
                    transaction.aggregate.book_id.clone(),
                    transaction.aggregate.last_event_id.next(),
                );
                transaction.then_play(Event::OrderCancelled(event))
            } else {
                Ok(transaction)
            }
        }
    }
}
