//! The persistence boundary.
//!
//! The engine never locks, retries or blocks: it assumes an optimistic
//! repository that detects a lost write race at append time and lets the
//! caller re-run the command against fresh state. [`InMemoryRepository`]
//! is the reference implementation — its append replays the transaction's
//! PRIMARY events through `play`, exactly as crash recovery would, so what
//! tests exercise is the same path a journalled store has to honour.

use std::collections::HashMap;

use matchbook_types::{BookId, EventId, MatchbookError, Result};

use crate::books::Books;
use crate::events::Event;
use crate::replay::apply_primaries;

/// Storage contract consumed by the engine's callers.
///
/// `append` must guarantee that no other writer committed events for the
/// same aggregate between the caller's `read` and this call — or fail with
/// a concurrency conflict so the caller can retry on fresh state.
pub trait BooksRepository {
    /// The current aggregate, or `None` if never created.
    fn read(&self, book_id: &BookId) -> Option<Books>;

    /// Atomically apply and persist `events`, expecting the stored
    /// aggregate to still sit at `expected_last_event_id`.
    fn append(
        &mut self,
        book_id: &BookId,
        expected_last_event_id: EventId,
        events: &[Event],
    ) -> Result<Books>;
}

#[derive(Debug)]
struct BookStore {
    aggregate: Books,
    log: Vec<Event>,
}

/// In-memory event store with optimistic concurrency.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    stores: HashMap<BookId, BookStore>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The full recorded stream for a book, primaries and side effects.
    #[must_use]
    pub fn event_log(&self, book_id: &BookId) -> &[Event] {
        self.stores.get(book_id).map_or(&[], |store| &store.log)
    }
}

impl BooksRepository for InMemoryRepository {
    fn read(&self, book_id: &BookId) -> Option<Books> {
        self.stores.get(book_id).map(|store| store.aggregate.clone())
    }

    fn append(
        &mut self,
        book_id: &BookId,
        expected_last_event_id: EventId,
        events: &[Event],
    ) -> Result<Books> {
        let current = self.stores.get(book_id);
        let current_last = current.map_or(EventId(0), |store| store.aggregate.last_event_id);
        if current_last != expected_last_event_id {
            return Err(MatchbookError::ConcurrencyConflict {
                book_id: book_id.clone(),
                expected: expected_last_event_id,
                actual: current_last,
            });
        }

        let start = current.map(|store| store.aggregate.clone());
        let aggregate = apply_primaries(start, book_id, events)?.ok_or_else(|| {
            MatchbookError::CorruptEventStream {
                book_id: book_id.clone(),
                reason: "append carried no applicable events".into(),
            }
        })?;

        let store = self.stores.entry(book_id.clone()).or_insert_with(|| BookStore {
            aggregate: aggregate.clone(),
            log: Vec::new(),
        });
        store.aggregate = aggregate.clone();
        store.log.extend(events.iter().cloned());
        Ok(aggregate)
    }
}
