//! One side of a book: resting entries in price/time/event-id priority.
//!
//! Entries are held in a priority-sorted `Vec` — sorted insert is O(n),
//! which keeps the whole-book priority scan of the matcher a plain slice
//! iteration. Every mutation returns a new book value so a pre-transaction
//! aggregate can be held alongside its successor.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use matchbook_types::{BookEntry, BookEntryKey, Side, TradeSideEntry};

/// One side's resting entries, best priority first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitBook {
    side: Side,
    entries: Vec<BookEntry>,
}

/// Priority order of two keys on one side: market entries first, then
/// price (side-signed, best first), then submission time ascending, then
/// event id ascending.
#[must_use]
pub fn priority(side: Side, a: &BookEntryKey, b: &BookEntryKey) -> Ordering {
    let by_price = match (a.price, b.price) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => {
            if side.sign() < 0 {
                left.cmp(&right).reverse()
            } else {
                left.cmp(&right)
            }
        }
    };
    by_price
        .then_with(|| a.when_submitted.cmp(&b.when_submitted))
        .then_with(|| a.event_id.cmp(&b.event_id))
}

impl LimitBook {
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self {
            side,
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Entries in priority order, best first.
    #[must_use]
    pub fn entries(&self) -> &[BookEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The highest-priority entry, if any.
    #[must_use]
    pub fn best(&self) -> Option<&BookEntry> {
        self.entries.first()
    }

    #[must_use]
    pub fn find(&self, key: &BookEntryKey) -> Option<&BookEntry> {
        self.entries.iter().find(|e| e.key == *key)
    }

    /// The book with `entry` inserted at its priority position.
    #[must_use]
    pub fn insert(&self, entry: BookEntry) -> Self {
        let at = self
            .entries
            .partition_point(|e| priority(self.side, &e.key, &entry.key) != Ordering::Greater);
        let mut entries = self.entries.clone();
        entries.insert(at, entry);
        Self {
            side: self.side,
            entries,
        }
    }

    /// The book without the entry under `key` (unchanged if absent).
    #[must_use]
    pub fn remove(&self, key: &BookEntryKey) -> Self {
        Self {
            side: self.side,
            entries: self
                .entries
                .iter()
                .filter(|e| e.key != *key)
                .cloned()
                .collect(),
        }
    }

    /// The book after applying a recorded trade snapshot: the entry under
    /// the snapshot's key is replaced with the post-trade sizes/status, or
    /// removed once nothing remains available. An absent key — the
    /// in-flight aggressor side of a trade — leaves the book unchanged.
    #[must_use]
    pub fn update_traded(&self, snapshot: &TradeSideEntry) -> Self {
        let key = snapshot.to_book_entry_key();
        let Some(at) = self.entries.iter().position(|e| e.key == key) else {
            return self.clone();
        };

        let mut entries = self.entries.clone();
        if snapshot.sizes.available == 0 {
            entries.remove(at);
        } else {
            entries[at] = BookEntry {
                sizes: snapshot.sizes,
                status: snapshot.status,
                ..entries[at].clone()
            };
        }
        Self {
            side: self.side,
            entries,
        }
    }
}
