//! Variable aggregation and statistics.
//!
//! This module collects the values of every record under its name and
//! finalizes them into sorted, deduplicated variables.

use crate::error::MergeError;
use crate::models::{MergedVariable, Record, Summary};
use std::collections::{BTreeMap, BTreeSet};

/// Mapping from variable name to every value token observed for it.
///
/// Values keep their first-seen order until [`Aggregate::finalize`].
#[derive(Debug, Default, Clone)]
pub struct Aggregate {
    variables: BTreeMap<String, Vec<String>>,
    records: usize,
    values_seen: usize,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an aggregate from a stream of records, stopping at the first error.
    pub fn collect<I>(records: I) -> Result<Self, MergeError>
    where
        I: IntoIterator<Item = Result<Record, MergeError>>,
    {
        let mut aggregate = Self::new();
        for record in records {
            aggregate.insert(record?);
        }
        Ok(aggregate)
    }

    /// Append a record's values to its name, creating the entry if needed.
    pub fn insert(&mut self, record: Record) {
        self.records += 1;
        self.values_seen += record.values.len();

        self.variables
            .entry(record.name)
            .or_default()
            .extend(record.values);
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Raw values recorded for `name`, duplicates included.
    #[cfg(test)]
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.variables.get(name).map(Vec::as_slice)
    }

    /// Number of records inserted.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Number of value tokens inserted, duplicates included.
    pub fn values_seen(&self) -> usize {
        self.values_seen
    }

    /// Compute summary counters for a run that read `lines_read` lines and
    /// skipped `skipped_lines` of them.
    pub fn summarize(&self, lines_read: usize, skipped_lines: usize) -> Summary {
        let unique_values = self
            .variables
            .values()
            .map(|values| values.iter().collect::<BTreeSet<_>>().len())
            .sum();

        Summary {
            lines_read,
            records: self.records,
            skipped_lines,
            names: self.variables.len(),
            values_seen: self.values_seen,
            unique_values,
        }
    }

    /// Consume the aggregate into variables sorted by name, each with
    /// sorted unique values.
    pub fn finalize(self) -> Vec<MergedVariable> {
        self.variables
            .into_iter()
            .map(|(name, values)| {
                let unique: BTreeSet<String> = values.into_iter().collect();
                MergedVariable {
                    name,
                    values: unique.into_iter().collect(),
                }
            })
            .collect()
    }
}
