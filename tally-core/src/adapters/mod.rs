//! Adapter implementations
//!
//! Adapters implement the port traits with concrete input formats:
//! - JSON lines (one tagged event per line) for the EventSource port
//! - The plain-text line form (`alice paid 30usd for flat`)
//! - In-memory sequences for tests and programmatic callers

pub mod json_lines;
pub mod line_format;
pub mod memory;

pub use json_lines::JsonLinesSource;
pub use line_format::LineSource;
pub use memory::IterSource;
