//! Recovery: rebuild an aggregate from its recorded event stream.
//!
//! Only PRIMARY events are re-applied. Side-effect events were generated
//! while playing a primary, and replaying that primary regenerates them —
//! deterministically, with the same ids — so re-applying them directly
//! would double-count. The recorded side effects still serve as a check:
//! after the fold the regenerated head must land exactly on the recorded
//! tail id.

use matchbook_types::{BookId, MatchbookError, Result};

use crate::books::Books;
use crate::events::{Event, EventType};

/// Rebuild the aggregate a recorded stream describes, or `None` for an
/// empty stream.
pub fn recover(book_id: &BookId, events: &[Event]) -> Result<Option<Books>> {
    apply_primaries(None, book_id, events)
}

/// Fold the PRIMARY events of `events` onto `start`, verifying the result
/// lands on the recorded tail.
pub(crate) fn apply_primaries(
    start: Option<Books>,
    book_id: &BookId,
    events: &[Event],
) -> Result<Option<Books>> {
    let mut books = start;

    for event in events {
        if event.event_type() != EventType::Primary {
            continue;
        }
        books = Some(match (&books, event) {
            (None, Event::BooksCreated(_)) => event.play(&Books::new(book_id.clone()))?.aggregate,
            (None, _) => {
                return Err(MatchbookError::CorruptEventStream {
                    book_id: book_id.clone(),
                    reason: format!(
                        "stream must begin with books creation, found event {}",
                        event.event_id()
                    ),
                });
            }
            (Some(_), Event::BooksCreated(_)) => {
                return Err(MatchbookError::CorruptEventStream {
                    book_id: book_id.clone(),
                    reason: format!("duplicate books creation at event {}", event.event_id()),
                });
            }
            (Some(current), _) => event.play(current)?.aggregate,
        });
    }

    if let (Some(current), Some(tail)) = (&books, events.last()) {
        if current.last_event_id != tail.event_id() {
            return Err(MatchbookError::CorruptEventStream {
                book_id: book_id.clone(),
                reason: format!(
                    "replayed head {} diverged from recorded tail {}",
                    current.last_event_id,
                    tail.event_id()
                ),
            });
        }
    }
    Ok(books)
}
