//! Entry size bookkeeping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The size triplet of a book entry.
///
/// `available` only ever decreases (trade or cancel); `traded` and
/// `cancelled` only ever increase. The original order size is
/// `available + traded + cancelled` at every point in the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntrySizes {
    pub available: u64,
    pub traded: u64,
    pub cancelled: u64,
}

impl EntrySizes {
    /// Sizes of a freshly placed entry: everything available.
    #[must_use]
    pub fn new(size: u64) -> Self {
        Self {
            available: size,
            traded: 0,
            cancelled: 0,
        }
    }

    /// The size the entry was originally placed with.
    #[must_use]
    pub fn original(&self) -> u64 {
        self.available + self.traded + self.cancelled
    }

    /// Sizes after trading `size`. Callers never trade more than is
    /// available — trade size is the min of both sides' availability.
    #[must_use]
    pub fn traded(&self, size: u64) -> Self {
        debug_assert!(size <= self.available);
        Self {
            available: self.available - size,
            traded: self.traded + size,
            cancelled: self.cancelled,
        }
    }

    /// Sizes after cancelling the whole remainder.
    #[must_use]
    pub fn cancelled(&self) -> Self {
        Self {
            available: 0,
            traded: self.traded,
            cancelled: self.cancelled + self.available,
        }
    }
}

impl fmt::Display for EntrySizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "avail={} traded={} cancelled={}",
            self.available, self.traded, self.cancelled
        )
    }
}
