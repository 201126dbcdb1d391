//! Client attribution: who placed a request, and which request it was.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The beneficial owner of an order or quote.
///
/// `firm_client_id` is optional: a firm may trade for its own account
/// (firm-level attribution only). Equality is structural, and the matching
/// rules treat an absent `firm_client_id` as *ambiguous* — a same-firm pair
/// where either side is ambiguous cannot trade (wash-trade prevention).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Client {
    pub firm_id: String,
    pub firm_client_id: Option<String>,
}

impl Client {
    #[must_use]
    pub fn new(firm_id: impl Into<String>, firm_client_id: Option<String>) -> Self {
        Self {
            firm_id: firm_id.into(),
            firm_client_id,
        }
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.firm_client_id {
            Some(client) => write!(f, "{}/{client}", self.firm_id),
            None => write!(f, "{}", self.firm_id),
        }
    }
}

/// Identifies one client request within a firm's order flow.
///
/// `original` carries the prior request id across amendments; `parent_id`
/// links an entry derived from a mass quote back to the quote id. An entry
/// whose request id has a parent is a quote entry — that link is what
/// mass-quote cancel-and-replace keys on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientRequestId {
    pub current: String,
    pub original: Option<String>,
    pub parent_id: Option<String>,
}

impl ClientRequestId {
    #[must_use]
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
            original: None,
            parent_id: None,
        }
    }

    /// A request id derived from a parent request (mass-quote legs).
    #[must_use]
    pub fn derived(current: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            current: current.into(),
            original: None,
            parent_id: Some(parent_id.into()),
        }
    }
}

impl fmt::Display for ClientRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current)
    }
}

// Test fixtures, compiled for unit tests and for dependents enabling the
// `test-helpers` feature.
#[cfg(any(test, feature = "test-helpers"))]
mod fixtures {
    use rand::Rng;
    use rand::distributions::Alphanumeric;

    use super::{Client, ClientRequestId};

    impl Client {
        /// A client from a fixed firm with a random firm client id.
        #[must_use]
        pub fn dummy() -> Self {
            Self::new("FIRM-1", Some(random_id(6)))
        }

        /// A firm-level client (no firm client id).
        #[must_use]
        pub fn dummy_firm_only() -> Self {
            Self::new("FIRM-1", None)
        }
    }

    impl ClientRequestId {
        /// A random request id.
        #[must_use]
        pub fn random() -> Self {
            Self::new(random_id(12))
        }
    }

    fn random_id(len: usize) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}
