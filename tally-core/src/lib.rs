//! Tally Core - shared-expense ledger and debt settlement
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Events, the name registry, per-currency ledger state
//! - **ports**: Trait definitions for external dependencies (EventSource)
//! - **services**: Event processing (the ledger fold) and settlement generation
//! - **adapters**: Concrete event sources (JSON lines, plain-text lines, in-memory)
//!
//! ```
//! use tally_core::{CurrencyDefinition, Event, Ledger, PersonDefinition, Transaction};
//!
//! let events: Vec<Event> = vec![
//!     PersonDefinition::new("alice").into(),
//!     PersonDefinition::new("bob").into(),
//!     CurrencyDefinition::new("usd").into(),
//!     Transaction::new(["alice"], 20.0, "usd", ["alice", "bob"]).into(),
//! ];
//!
//! let mut ledger = Ledger::from_events(events).unwrap();
//! let instructions = ledger.settle_currency("usd").unwrap();
//! assert_eq!(instructions.len(), 1);
//! assert_eq!(instructions[0].debtor, 0);
//! assert_eq!(instructions[0].creditor, 1);
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types at crate root
pub use adapters::{IterSource, JsonLinesSource, LineSource};
pub use config::Config;
pub use domain::result::{Error, Namespace, Result, Side};
pub use domain::{
    ConversionRule, CurrencyConversion, CurrencyDefinition, DebtVector, EntityRegistry, Event,
    GroupDefinition, LedgerState, PersonDefinition, PersonId, SettlementInstruction, Transaction,
};
pub use ports::EventSource;
pub use services::{CurrencySettlement, Ledger, SettlementGenerator, SETTLEMENT_EPSILON};
