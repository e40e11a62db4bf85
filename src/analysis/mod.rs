//! Aggregation of records into merged variables.

pub mod aggregator;

pub use aggregator::*;
