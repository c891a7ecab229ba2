//! Data layer for the bikeshare explorer.
//!
//! Reads city CSV files into trip tables, applies month/day filters and
//! computes the time, station, duration and user statistics.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use bikeshare_core as core;
