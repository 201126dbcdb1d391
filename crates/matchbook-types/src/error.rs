//! Error types for the matchbook engine.
//!
//! All errors use the `MB_ERR_` prefix convention for easy grepping in
//! logs. Error codes are grouped by subsystem:
//! - 1xx: Domain rejections — expected business outcomes, returned as
//!   values and never fatal
//! - 2xx: Event sequencing — consistency violations, fatal for the
//!   current command
//! - 3xx: Repository / concurrency

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BookId, EventId, TradingStatus};

/// Central error enum for all matchbook operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchbookError {
    // =================================================================
    // Domain rejections (1xx)
    // =================================================================
    /// A books aggregate already exists under this id.
    #[error("MB_ERR_100: Books already exists: {0}")]
    BooksAlreadyExists(BookId),

    /// No books aggregate exists under this id.
    #[error("MB_ERR_101: Unknown books: {0}")]
    UnknownBooks(BookId),

    /// An order or quote leg carried a non-positive size.
    #[error("MB_ERR_102: Incorrect quantity: {size}")]
    IncorrectQuantity { size: u64 },

    /// The book's effective trading status does not allow placing.
    #[error("MB_ERR_103: Exchange closed for placing: {status}")]
    ExchangeClosed { status: TradingStatus },

    /// The order combined characteristics the engine does not support.
    #[error("MB_ERR_104: Unsupported order characteristic: {reason}")]
    UnsupportedOrderCharacteristic { reason: String },

    // =================================================================
    // Event sequencing (2xx)
    // =================================================================
    /// An event's id was not the immediate successor of the aggregate's
    /// last applied id — corrupted storage, a write race the repository
    /// failed to prevent, or a replay bug. Never repaired, only surfaced.
    #[error("MB_ERR_200: Sequence violation: last applied {last}, got {actual}")]
    SequenceViolation { last: EventId, actual: EventId },

    // =================================================================
    // Repository / concurrency (3xx)
    // =================================================================
    /// An optimistic append lost the race against a concurrent writer.
    #[error("MB_ERR_300: Concurrency conflict on {book_id}: expected last event {expected}, found {actual}")]
    ConcurrencyConflict {
        book_id: BookId,
        expected: EventId,
        actual: EventId,
    },

    /// An event stream could not be replayed into a consistent aggregate.
    #[error("MB_ERR_301: Corrupt event stream for {book_id}: {reason}")]
    CorruptEventStream { book_id: BookId, reason: String },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, MatchbookError>;

/// Why an order or mass quote was rejected. Recorded on the rejection
/// event; the set mirrors FIX `OrdRejReason` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    BrokerExchangeOption,
    UnknownSymbol,
    ExchangeClosed,
    UnknownOrder,
    DuplicateOrder,
    UnsupportedOrderCharacteristic,
    IncorrectQuantity,
    UnknownAccounts,
    Other,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::BrokerExchangeOption => "BROKER_EXCHANGE_OPTION",
            Self::UnknownSymbol => "UNKNOWN_SYMBOL",
            Self::ExchangeClosed => "EXCHANGE_CLOSED",
            Self::UnknownOrder => "UNKNOWN_ORDER",
            Self::DuplicateOrder => "DUPLICATE_ORDER",
            Self::UnsupportedOrderCharacteristic => "UNSUPPORTED_ORDER_CHARACTERISTIC",
            Self::IncorrectQuantity => "INCORRECT_QUANTITY",
            Self::UnknownAccounts => "UNKNOWN_ACCOUNTS",
            Self::Other => "OTHER",
        };
        write!(f, "{text}")
    }
}
