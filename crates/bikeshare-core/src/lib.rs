//! Shared domain types for the bikeshare explorer.
//!
//! Holds the city and filter enumerations, trip records and tables, the
//! error type, command-line settings and display formatting helpers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
