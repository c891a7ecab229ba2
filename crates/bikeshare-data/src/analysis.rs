//! Descriptive statistics over a filtered trip table.
//!
//! Four independent, read-only routines: travel times, stations, trip
//! durations and users. Each result records how long it took to compute.
//! [`analyze_trips`] runs all four.

use std::time::{Duration, Instant};

use bikeshare_core::models::{TripTable, WEEKDAYS};
use chrono::Weekday;
use tracing::debug;

use crate::aggregator::Tally;

// ── Public types ──────────────────────────────────────────────────────────────

/// The most frequent value of a column and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode<T> {
    pub value: T,
    pub count: u64,
}

impl<T: Clone + Ord> Mode<T> {
    fn of(tally: &Tally<T>) -> Option<Self> {
        tally.most_common().map(|(value, count)| Mode {
            value: value.clone(),
            count,
        })
    }
}

/// Most frequent times of travel. Fields are `None` for an empty table.
#[derive(Debug, Clone)]
pub struct TimeStats {
    /// 1-based month.
    pub month: Option<Mode<u32>>,
    pub day_of_week: Option<Mode<Weekday>>,
    pub hour: Option<Mode<u32>>,
    pub elapsed: Duration,
}

/// Most popular stations and trip.
#[derive(Debug, Clone)]
pub struct StationStats {
    pub start_station: Option<Mode<String>>,
    pub end_station: Option<Mode<String>>,
    /// Key is `"<start> to <end>"`.
    pub trip: Option<Mode<String>>,
    pub elapsed: Duration,
}

/// Total and mean trip duration, in seconds.
#[derive(Debug, Clone)]
pub struct DurationStats {
    pub trip_count: usize,
    pub total_seconds: f64,
    /// `None` when there are no trips.
    pub mean_seconds: Option<f64>,
    pub elapsed: Duration,
}

/// Earliest, most recent and most common birth year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: Mode<i32>,
}

/// Birth-year outcome, depending on the city's columns and the rows kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BirthYearReport {
    /// The city file has no birth-year column.
    Unavailable,
    /// The column exists but no filtered row has a value.
    NoValues,
    Years(BirthYearStats),
}

/// User demographics.
#[derive(Debug, Clone)]
pub struct UserStats {
    /// Count per user type, highest first. Blank cells are not counted.
    pub user_types: Vec<(String, u64)>,
    /// Count per gender, highest first; `None` when the city has no gender
    /// column.
    pub genders: Option<Vec<(String, u64)>>,
    pub birth_years: BirthYearReport,
    pub elapsed: Duration,
}

/// All four statistics for one table.
#[derive(Debug, Clone)]
pub struct TripAnalysis {
    pub times: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run every statistics routine over `table`.
pub fn analyze_trips(table: &TripTable) -> TripAnalysis {
    let analysis = TripAnalysis {
        times: time_stats(table),
        stations: station_stats(table),
        durations: duration_stats(table),
        users: user_stats(table),
    };
    debug!(
        "Analysed {} trips in {:?}",
        table.len(),
        analysis.times.elapsed
            + analysis.stations.elapsed
            + analysis.durations.elapsed
            + analysis.users.elapsed
    );
    analysis
}

/// Most common month, day of week and start hour.
///
/// Days tie-break in Monday-first order; months and hours numerically.
pub fn time_stats(table: &TripTable) -> TimeStats {
    let start = Instant::now();

    let months: Tally<u32> = table.trips.iter().map(|t| t.month).collect();
    let days: Tally<u32> = table
        .trips
        .iter()
        .map(|t| t.day_of_week.num_days_from_monday())
        .collect();
    let hours: Tally<u32> = table.trips.iter().map(|t| t.hour).collect();

    let day_of_week = Mode::of(&days).map(|m| Mode {
        value: WEEKDAYS[m.value as usize],
        count: m.count,
    });

    TimeStats {
        month: Mode::of(&months),
        day_of_week,
        hour: Mode::of(&hours),
        elapsed: start.elapsed(),
    }
}

/// Most common start station, end station and start-to-end trip.
pub fn station_stats(table: &TripTable) -> StationStats {
    let start = Instant::now();

    let starts: Tally<&str> = table.trips.iter().map(|t| t.start_station.as_str()).collect();
    let ends: Tally<&str> = table.trips.iter().map(|t| t.end_station.as_str()).collect();
    let trips: Tally<String> = table.trips.iter().map(|t| t.route()).collect();

    StationStats {
        start_station: owned_mode(&starts),
        end_station: owned_mode(&ends),
        trip: Mode::of(&trips),
        elapsed: start.elapsed(),
    }
}

/// Total and mean trip duration.
pub fn duration_stats(table: &TripTable) -> DurationStats {
    let start = Instant::now();

    let trip_count = table.len();
    let total_seconds: f64 = table.trips.iter().map(|t| t.trip_duration).sum();
    let mean_seconds = (trip_count > 0).then(|| total_seconds / trip_count as f64);

    DurationStats {
        trip_count,
        total_seconds,
        mean_seconds,
        elapsed: start.elapsed(),
    }
}

/// User-type counts, plus gender and birth-year figures when the city's
/// file carries those columns.
pub fn user_stats(table: &TripTable) -> UserStats {
    let start = Instant::now();

    let user_types: Tally<&str> = table
        .trips
        .iter()
        .filter_map(|t| t.user_type.as_deref())
        .collect();

    let genders = table.has_gender().then(|| {
        let tally: Tally<&str> = table
            .trips
            .iter()
            .filter_map(|t| t.gender.as_deref())
            .collect();
        owned_ranking(&tally)
    });

    let birth_years = if table.has_birth_year() {
        let years: Tally<i32> = table.trips.iter().filter_map(|t| t.birth_year).collect();
        match (years.min_key(), years.max_key(), Mode::of(&years)) {
            (Some(&earliest), Some(&most_recent), Some(most_common)) => {
                BirthYearReport::Years(BirthYearStats {
                    earliest,
                    most_recent,
                    most_common,
                })
            }
            _ => BirthYearReport::NoValues,
        }
    } else {
        BirthYearReport::Unavailable
    };

    UserStats {
        user_types: owned_ranking(&user_types),
        genders,
        birth_years,
        elapsed: start.elapsed(),
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn owned_mode(tally: &Tally<&str>) -> Option<Mode<String>> {
    tally.most_common().map(|(value, count)| Mode {
        value: value.to_string(),
        count,
    })
}

fn owned_ranking(tally: &Tally<&str>) -> Vec<(String, u64)> {
    tally
        .ranked()
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
