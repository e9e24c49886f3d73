//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The ledger
//! depends only on these traits, not on concrete input formats.

mod event_source;

pub use event_source::EventSource;
