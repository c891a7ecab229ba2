//! Console layer for the bikeshare explorer.
//!
//! Provides line-based prompting, statistic report rendering, raw row
//! tables, the five-row pager and the interactive session loop.

pub mod app;
pub mod console;
pub mod pager;
pub mod report;
pub mod table_view;

pub use bikeshare_core as core;
