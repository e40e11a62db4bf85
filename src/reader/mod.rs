//! Line reader for turning raw input into records.
//!
//! This module splits each input line on whitespace and applies the
//! empty-line policy before handing records to the aggregator.

use crate::error::MergeError;
use crate::models::{EmptyLinePolicy, Record};
use std::io::{BufRead, Lines};
use tracing::{debug, trace};

/// Token separator: Unicode whitespace plus the information separators
/// U+001C..=U+001F.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Parse a single line into a record.
///
/// Returns `None` when the line holds no tokens (empty or whitespace only).
pub fn parse_record(line: &str) -> Option<Record> {
    let mut tokens = line.split(is_separator).filter(|t| !t.is_empty());
    let name = tokens.next()?;

    Some(Record::new(name, tokens.map(String::from).collect()))
}

/// Iterator over the records of a buffered input.
pub struct RecordReader<R> {
    lines: Lines<R>,
    policy: EmptyLinePolicy,
    lines_read: usize,
    skipped_lines: usize,
}

impl<R: BufRead> RecordReader<R> {
    /// Create a reader over `input` using the given empty-line policy.
    pub fn new(input: R, policy: EmptyLinePolicy) -> Self {
        Self {
            lines: input.lines(),
            policy,
            lines_read: 0,
            skipped_lines: 0,
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Number of empty lines ignored so far.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record, MergeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(MergeError::Io(e))),
            };
            self.lines_read += 1;

            match parse_record(&line) {
                Some(record) => {
                    trace!(line = self.lines_read, name = %record.name, "Parsed record");
                    return Some(Ok(record));
                }
                None => match self.policy {
                    EmptyLinePolicy::Skip => {
                        debug!(line = self.lines_read, "Skipping empty line");
                        self.skipped_lines += 1;
                    }
                    EmptyLinePolicy::Fail => {
                        return Some(Err(MergeError::InputFormat {
                            line: self.lines_read,
                        }));
                    }
                },
            }
        }
    }
}
