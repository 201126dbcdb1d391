//! # matchbook-core
//!
//! **Pure deterministic event-sourced book and matching engine.**
//!
//! The engine is the compute plane of an exchange order book: a command is
//! validated against the current [`Books`] aggregate, produces a primary
//! event, and playing that event yields a new aggregate plus the ordered
//! side-effect events (trades, book mutations) it generated. It has:
//!
//! - **Zero side effects**: no I/O, no clocks, no shared mutable state
//! - **Replay determinism**: the same event stream always rebuilds the
//!   exact same aggregate, bit for bit
//! - **Strict sequencing**: every applied event must be the immediate
//!   successor of the aggregate's last event id
//! - **Wash-trade prevention**: same-beneficial-owner pairs never match
//!
//! Persistence is an injected collaborator behind [`BooksRepository`];
//! [`InMemoryRepository`] is the reference implementation used by tests.

pub mod books;
pub mod commands;
pub mod events;
pub mod limit_book;
pub mod matching;
pub mod replay;
pub mod repository;
pub mod rules;
pub mod time_in_force;
pub mod transaction;

pub use books::Books;
pub use commands::{CreateBooksCommand, PlaceMassQuoteCommand, PlaceOrderCommand};
pub use events::{
    BooksCreatedEvent, EntriesRemovedFromBookEvent, EntryAddedToBookEvent, Event, EventType,
    MassQuotePlacedEvent, MassQuoteRejectedEvent, OrderCancelledEvent, OrderPlacedEvent,
    OrderRejectedEvent, TradeEvent,
};
pub use limit_book::LimitBook;
pub use matching::{Match, MatchResult, find_next_match, match_and_place_entry, match_entry};
pub use replay::recover;
pub use repository::{BooksRepository, InMemoryRepository};
pub use time_in_force::finalise;
pub use transaction::Transaction;
