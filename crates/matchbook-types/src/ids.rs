//! Aggregate identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one `Books` aggregate — a single tradeable instrument's pair
/// of limit books. Assigned by the exchange's reference data, opaque here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BookId(pub String);

impl BookId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "book:{}", self.0)
    }
}
