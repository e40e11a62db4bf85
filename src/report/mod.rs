//! Rendering of merged variables.

pub mod generator;

pub use generator::*;
