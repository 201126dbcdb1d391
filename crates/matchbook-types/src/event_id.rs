//! Aggregate event sequencing.
//!
//! Every event applied to a `Books` aggregate carries an [`EventId`] that
//! must be the immediate successor of the aggregate's last applied id. The
//! sequence wraps at `u64::MAX` back to zero; adjacency and ordering both
//! special-case the wrap boundary so a freshly wrapped zero still counts as
//! *after* the maximum value it succeeded.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Monotonically increasing, wrapping per-aggregate sequence number.
///
/// An `EventId` is owned exclusively by its aggregate — two aggregates
/// never share a sequence, and ids are never reused within one (short of a
/// full `u64` wrap).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub u64);

impl EventId {
    /// The successor id, wrapping `u64::MAX` to zero.
    #[must_use]
    pub fn next(self) -> Self {
        Self(if self.0 == u64::MAX { 0 } else { self.0 + 1 })
    }

    /// `true` iff `self` is the immediate successor of `other`.
    ///
    /// Exactly one id succeeds any given id: `n + 1`, or zero when `other`
    /// sits at the wrap boundary.
    #[must_use]
    pub fn is_next_of(self, other: Self) -> bool {
        if other.0 == u64::MAX {
            self.0 == 0
        } else {
            self.0 == other.0 + 1
        }
    }
}

impl PartialOrd for EventId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventId {
    fn cmp(&self, other: &Self) -> Ordering {
        // Zero and MAX only coexist right at the wrap boundary, where the
        // freshly wrapped zero is the later id.
        match (self.0, other.0) {
            (u64::MAX, 0) => Ordering::Less,
            (0, u64::MAX) => Ordering::Greater,
            (a, b) => a.cmp(&b),
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
