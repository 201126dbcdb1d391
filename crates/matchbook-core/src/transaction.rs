//! The atomic unit of state transition: a new aggregate plus the ordered
//! events that produced it.

use matchbook_types::Result;

use crate::books::Books;
use crate::events::Event;

/// The output of applying one or more events: the resulting aggregate and
/// every event applied, in order. This is what the caller hands to the
/// repository as one atomic append.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub aggregate: Books,
    pub events: Vec<Event>,
}

impl Transaction {
    /// A transaction with no events yet.
    #[must_use]
    pub fn new(aggregate: Books) -> Self {
        Self {
            aggregate,
            events: Vec::new(),
        }
    }

    /// Merge a sub-transaction onto this one: the later aggregate wins
    /// (right-biased) and event lists concatenate in order.
    #[must_use]
    pub fn append(mut self, other: Self) -> Self {
        self.events.extend(other.events);
        Self {
            aggregate: other.aggregate,
            events: self.events,
        }
    }

    /// Play `event` against the current aggregate, recording the event
    /// itself followed by whatever side effects playing it generated.
    pub fn then_play(mut self, event: Event) -> Result<Self> {
        let result = event.play(&self.aggregate)?;
        self.events.push(event);
        self.events.extend(result.events);
        Ok(Self {
            aggregate: result.aggregate,
            events: self.events,
        })
    }
}

#[cfg(test)]
mod tests {
    use matchbook_types::{BookId, EventId};

    use super::*;
    use crate::events::{Event, OrderRejectedEvent};

    fn books() -> Books {
        Books::new(BookId::new("XBT-LDN"))
    }

    #[test]
    fn append_is_right_biased_on_the_aggregate() {
        let left = Transaction::new(books());
        let right = Transaction::new(books().with_event_id(EventId(3)));
        let merged = left.append(right);
        assert_eq!(merged.aggregate.last_event_id, EventId(3));
        assert!(merged.events.is_empty());
    }

    #[test]
    fn append_concatenates_events_in_order() {
        let reject_a = Event::OrderRejected(OrderRejectedEvent::dummy(books().book_id.clone(), EventId(1)));
        let reject_b = Event::OrderRejected(OrderRejectedEvent::dummy(books().book_id.clone(), EventId(2)));

        let mut left = Transaction::new(books());
        left.events.push(reject_a.clone());
        let mut right = Transaction::new(books());
        right.events.push(reject_b.clone());

        let merged = left.append(right);
        assert_eq!(merged.events, vec![reject_a, reject_b]);
    }

    #[test]
    fn then_play_records_the_event_and_advances_the_aggregate() {
        let event = Event::OrderRejected(OrderRejectedEvent::dummy(books().book_id.clone(), EventId(1)));
        let txn = Transaction::new(books()).then_play(event.clone()).unwrap();
        assert_eq!(txn.events, vec![event]);
        assert_eq!(txn.aggregate.last_event_id, EventId(1));
    }

    #[test]
    fn then_play_surfaces_sequence_violations() {
        let event = Event::OrderRejected(OrderRejectedEvent::dummy(books().book_id.clone(), EventId(9)));
        assert!(Transaction::new(books()).then_play(event).is_err());
    }
}
