//! City CSV loading for the bikeshare explorer.
//!
//! Reads one city's trip file into a [`TripTable`], deriving month, weekday
//! and hour from each start time, then applies the month/day filters.

use std::io::Read;
use std::path::Path;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, ColumnSet, Filters, Trip, TripTable};
use bikeshare_core::settings::CityFiles;
use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Columns every city file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Start Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

// ── TripSource ────────────────────────────────────────────────────────────────

/// Anything that can produce a filtered trip table for a selection.
pub trait TripSource {
    fn load(&self, filters: &Filters) -> Result<TripTable>;
}

/// [`TripSource`] backed by the per-city CSV files.
#[derive(Debug, Clone)]
pub struct CsvTripSource {
    files: CityFiles,
}

impl CsvTripSource {
    pub fn new(files: CityFiles) -> Self {
        Self { files }
    }
}

impl TripSource for CsvTripSource {
    fn load(&self, filters: &Filters) -> Result<TripTable> {
        load_trips(&self.files, filters)
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the selected city's file and keep the trips matching `filters`.
///
/// Row order is preserved. A selection that matches nothing yields an empty
/// table.
pub fn load_trips(files: &CityFiles, filters: &Filters) -> Result<TripTable> {
    let path = files.path(filters.city);
    let table = read_city_file(path, filters.city)?;
    let loaded = table.len();

    let table = table.filter(filters);
    info!(
        "Loaded {} trips for {}, {} after filtering by {} / {}",
        loaded,
        filters.city,
        table.len(),
        filters.month,
        filters.day
    );

    Ok(table)
}

/// Read every row of a city file without filtering.
pub fn read_city_file(path: &Path, city: City) -> Result<TripTable> {
    let file = std::fs::File::open(path).map_err(|source| BikeshareError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_trips(file, path, city)
}

/// Parse CSV trip data from any reader.
///
/// `path` is only used to label errors.
pub fn read_trips<R: Read>(input: R, path: &Path, city: City) -> Result<TripTable> {
    let csv_err = |source: csv::Error| BikeshareError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let headers = reader.headers().map_err(csv_err)?.clone();
    let columns = check_columns(&headers, path)?;
    debug!(
        "{}: columns {:?}, optional {:?}",
        path.display(),
        headers.iter().collect::<Vec<_>>(),
        columns
    );

    let mut trips = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(csv_err)?;
        let raw: RawTrip = record.deserialize(Some(&headers)).map_err(csv_err)?;
        trips.push(raw.into_trip(path, row)?);
    }

    let blank_user_types = trips.iter().filter(|t| t.user_type.is_none()).count();
    if blank_user_types > 0 {
        warn!(
            "{}: {} of {} rows have a blank user type",
            path.display(),
            blank_user_types,
            trips.len()
        );
    }
    debug!("{}: {} rows read", path.display(), trips.len());

    Ok(TripTable::new(city, columns, trips))
}

/// Parse a start/end time cell.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Fail on a missing required column; report which optional ones exist.
fn check_columns(headers: &csv::StringRecord, path: &Path) -> Result<ColumnSet> {
    let has = |name: &str| headers.iter().any(|h| h == name);

    if let Some(missing) = REQUIRED_COLUMNS.into_iter().find(|c| !has(*c)) {
        return Err(BikeshareError::MissingColumn {
            path: path.to_path_buf(),
            column: missing.to_string(),
        });
    }

    Ok(ColumnSet {
        end_time: has("End Time"),
        gender: has("Gender"),
        birth_year: has("Birth Year"),
    })
}

/// One CSV row as stored on disk.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

impl RawTrip {
    fn into_trip(self, path: &Path, row: usize) -> Result<Trip> {
        let timestamp = |value: &str| {
            parse_timestamp(value).ok_or_else(|| BikeshareError::TimestampParse {
                path: path.to_path_buf(),
                row,
                value: value.to_string(),
            })
        };

        let start_time = timestamp(self.start_time.as_str())?;
        let end_time = self.end_time.as_deref().map(timestamp).transpose()?;

        let mut trip = Trip::new(
            start_time,
            self.start_station,
            self.end_station,
            self.trip_duration,
        );
        trip.end_time = end_time;
        trip.user_type = non_blank(self.user_type);
        trip.gender = non_blank(self.gender);
        // Years come through as floats (`1992.0`) in files with blanks.
        trip.birth_year = self
            .birth_year
            .filter(|y| y.is_finite())
            .map(|y| y.trunc() as i32);
        Ok(trip)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
