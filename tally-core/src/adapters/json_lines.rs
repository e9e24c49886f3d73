//! JSON lines event source
//!
//! Each non-blank line holds one event object tagged by `type`:
//!
//! ```text
//! # comments start with a hash
//! {"type": "person", "name": "alice", "aliases": ["al"]}
//! {"type": "currency", "name": "usd"}
//! {"type": "transaction", "payers": ["alice"], "amount": 30, "currency": "usd", "payees": ["alice", "bob"]}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::domain::result::{Error, Result};
use crate::domain::Event;
use crate::ports::EventSource;

/// Streams events from a line-oriented reader
pub struct JsonLinesSource<R> {
    reader: R,
    buffer: String,
    line: usize,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line: 0,
        }
    }

    /// Number of input lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

impl JsonLinesSource<BufReader<File>> {
    /// Open a file for streaming
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> EventSource for JsonLinesSource<R> {
    fn name(&self) -> &str {
        "json-lines"
    }

    fn next_event(&mut self) -> Result<Option<Event>> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let trimmed = self.buffer.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            return serde_json::from_str(trimmed)
                .map(Some)
                .map_err(|e| Error::parse(self.line, e.to_string()));
        }
    }
}
