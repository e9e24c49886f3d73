//! Core domain entities
//!
//! Events, the name registry, per-currency ledger state and settlement
//! instructions. These are pure data structures with validation logic -
//! no I/O.

pub mod event;
mod ledger;
mod registry;
mod settlement;
pub mod result;

pub use event::{
    CurrencyConversion, CurrencyDefinition, Event, GroupDefinition, PersonDefinition, Transaction,
};
pub use ledger::{ConversionRule, LedgerState};
pub use registry::EntityRegistry;
pub use settlement::SettlementInstruction;

/// Dense person identifier, equal to registration order
pub type PersonId = usize;

/// Per-person net balances of one currency, indexed by `PersonId`
pub type DebtVector = Vec<f64>;
