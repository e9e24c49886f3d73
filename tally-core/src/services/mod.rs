//! Service layer - event processing and settlement
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case.

pub mod logging;
mod processor;
mod settlement;

pub use processor::{CurrencySettlement, Ledger};
pub use settlement::{settle, SettlementGenerator, SETTLEMENT_EPSILON};
