use clap::Parser;
use std::path::{Path, PathBuf};

use crate::error::{BikeshareError, Result};
use crate::models::City;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Explore US bikeshare trip data interactively
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Explore US bikeshare trip data interactively",
    version
)]
pub struct Settings {
    /// Directory holding the city CSV files
    #[arg(long, default_value = ".", env = "BIKESHARE_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Chicago trip file (relative to the data directory unless absolute)
    #[arg(long, default_value = "chicago.csv")]
    pub chicago: PathBuf,

    /// New York City trip file (relative to the data directory unless absolute)
    #[arg(long, default_value = "new_york_city.csv")]
    pub new_york_city: PathBuf,

    /// Washington trip file (relative to the data directory unless absolute)
    #[arg(long, default_value = "washington.csv")]
    pub washington: PathBuf,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Leave out per-report execution times
    #[arg(long)]
    pub no_timing: bool,
}

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but from an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    fn resolve(mut settings: Settings) -> Self {
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Build the city-to-file mapping from these settings.
    ///
    /// Fails when the data directory does not exist.
    pub fn city_files(&self) -> Result<CityFiles> {
        if !self.data_dir.is_dir() {
            return Err(BikeshareError::Config(format!(
                "data directory {} does not exist",
                self.data_dir.display()
            )));
        }
        Ok(CityFiles {
            chicago: self.data_dir.join(&self.chicago),
            new_york_city: self.data_dir.join(&self.new_york_city),
            washington: self.data_dir.join(&self.washington),
        })
    }
}

// ── CityFiles ─────────────────────────────────────────────────────────────────

/// Immutable mapping from each city to its backing CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityFiles {
    chicago: PathBuf,
    new_york_city: PathBuf,
    washington: PathBuf,
}

impl CityFiles {
    pub fn new(
        chicago: impl Into<PathBuf>,
        new_york_city: impl Into<PathBuf>,
        washington: impl Into<PathBuf>,
    ) -> Self {
        Self {
            chicago: chicago.into(),
            new_york_city: new_york_city.into(),
            washington: washington.into(),
        }
    }

    /// The standard file names resolved inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(
            dir.join("chicago.csv"),
            dir.join("new_york_city.csv"),
            dir.join("washington.csv"),
        )
    }

    pub fn path(&self, city: City) -> &Path {
        match city {
            City::Chicago => &self.chicago,
            City::NewYorkCity => &self.new_york_city,
            City::Washington => &self.washington,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
