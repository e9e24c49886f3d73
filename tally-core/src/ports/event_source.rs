//! Event source port
//!
//! Defines how the ledger pulls its input. Sources hand out one typed event
//! at a time so a long stream never has to be held in memory.

use crate::domain::result::Result;
use crate::domain::Event;

/// Producer of ledger events, in input order
///
/// Implementations own the decoding of their input format (JSON lines,
/// in-memory lists, ...). Returning `Ok(None)` ends the stream; an error
/// ends the whole run.
pub trait EventSource {
    /// Short name used in diagnostics (e.g., "json-lines", "memory")
    fn name(&self) -> &str;

    /// Pull the next event, or `None` once the input is exhausted
    fn next_event(&mut self) -> Result<Option<Event>>;
}
