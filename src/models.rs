//! Data models for the variable merger.
//!
//! This module contains the core data structures shared by the reader,
//! the aggregator and the report generator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One input line: a variable name followed by its value tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// First token of the line.
    pub name: String,
    /// Remaining tokens, in the order they appeared.
    pub values: Vec<String>,
}

impl Record {
    /// Create a record from a name and its values.
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// What to do with a line that contains no tokens.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EmptyLinePolicy {
    /// Ignore the line (default)
    #[default]
    Skip,
    /// Abort the run with an input format error
    Fail,
}

impl fmt::Display for EmptyLinePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyLinePolicy::Skip => write!(f, "skip"),
            EmptyLinePolicy::Fail => write!(f, "fail"),
        }
    }
}

/// Output format for the merged variables.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `name value...` line per variable (default)
    #[default]
    Text,
    /// A single JSON object mapping names to value arrays
    Json,
}

/// A finalized variable: its name and sorted, deduplicated values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedVariable {
    pub name: String,
    pub values: Vec<String>,
}

impl MergedVariable {
    /// Returns true if no value was ever recorded for this name.
    pub fn is_bare(&self) -> bool {
        self.values.is_empty()
    }
}

/// Counters collected while reading and aggregating input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Physical lines consumed from the input.
    pub lines_read: usize,
    /// Lines that produced a record.
    pub records: usize,
    /// Empty lines ignored under the `skip` policy.
    pub skipped_lines: usize,
    /// Distinct names.
    pub names: usize,
    /// Value tokens seen, duplicates included.
    pub values_seen: usize,
    /// Distinct values summed over all names.
    pub unique_values: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines read, {} records, {} skipped, {} names, {} values ({} unique)",
            self.lines_read,
            self.records,
            self.skipped_lines,
            self.names,
            self.values_seen,
            self.unique_values
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_deserialize_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: EmptyLinePolicy,
        }

        let w: Wrapper = toml::from_str("policy = \"fail\"").unwrap();
        assert_eq!(w.policy, EmptyLinePolicy::Fail);
        assert_eq!(EmptyLinePolicy::default(), EmptyLinePolicy::Skip);
    }

    #[test]
    fn test_summary_display() {
        let summary = Summary {
            lines_read: 4,
            records: 3,
            skipped_lines: 1,
            names: 2,
            values_seen: 5,
            unique_values: 4,
        };

        assert_eq!(
            summary.to_string(),
            "4 lines read, 3 records, 1 skipped, 2 names, 5 values (4 unique)"
        );
    }

    #[test]
    fn test_bare_variable() {
        let bare = MergedVariable {
            name: "z".to_string(),
            values: vec![],
        };
        assert!(bare.is_bare());
    }
}
