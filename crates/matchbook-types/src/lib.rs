//! # matchbook-types
//!
//! Shared value objects and errors for the **matchbook** event-sourced
//! order book.
//!
//! This crate is the leaf dependency of the workspace — the engine crate
//! depends on it and nothing here depends back. It defines:
//!
//! - **Sequencing**: [`EventId`] — the wrapping per-aggregate sequence number
//! - **Identifiers**: [`BookId`], [`ClientRequestId`], [`Client`]
//! - **Scalars**: [`Price`], [`PriceWithSize`], [`EntrySizes`]
//! - **Entry model**: [`BookEntry`], [`BookEntryKey`], [`TradeSideEntry`],
//!   [`Side`], [`EntryType`], [`EntryStatus`], [`TimeInForce`]
//! - **Quote model**: [`QuoteEntry`], [`QuoteModelType`]
//! - **Trading status**: [`TradingStatus`], [`TradingStatuses`]
//! - **Errors**: [`MatchbookError`] with `MB_ERR_` prefix codes,
//!   [`RejectReason`]
//!
//! Everything is plain data with value semantics: construction cannot
//! produce a negative id, price or size (all unsigned), and every state
//! transition returns a new value instead of mutating in place.

pub mod client;
pub mod entry;
pub mod error;
pub mod event_id;
pub mod ids;
pub mod price;
pub mod quantity;
pub mod quote;
pub mod status;

// Re-export all primary types at crate root for ergonomic imports:
//   use matchbook_types::{BookEntry, EventId, Price, Side, ...};

pub use client::*;
pub use entry::*;
pub use error::*;
pub use event_id::*;
pub use ids::*;
pub use price::*;
pub use quantity::*;
pub use quote::*;
pub use status::*;
