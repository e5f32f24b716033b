//! Report module.
//!
//! This module assembles the mapping report rows and serializes them to
//! the CSV sink.

pub mod builder;
pub mod types;

pub use builder::{write_csv, ReportBuilder};
pub use types::{ReportRow, RowSource, CSV_HEADER};
