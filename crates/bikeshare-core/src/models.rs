use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::error::BikeshareError;

/// Month selectors offered to the user, in calendar order.
pub const FILTER_MONTHS: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

/// Days of the week in Monday-first order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Title-case English name of a 1-based month number.
///
/// Returns `"Unknown"` outside `1..=12`.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("Unknown")
}

/// Title-case English name of a weekday, e.g. `"Monday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn normalise(input: &str) -> String {
    input.trim().to_lowercase()
}

// ── City ──────────────────────────────────────────────────────────────────────

/// One of the three cities with trip data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case selector accepted at the prompt.
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Display name, e.g. `"New York City"`.
    pub fn display_name(&self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalise(s);
        City::ALL
            .into_iter()
            .find(|city| city.as_str() == wanted)
            .ok_or_else(|| BikeshareError::InvalidFilter {
                kind: "city",
                value: s.trim().to_string(),
            })
    }
}

// ── MonthFilter ───────────────────────────────────────────────────────────────

/// Month selector: every month, or one of January through June.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    /// 1-based month number within `1..=6`.
    Month(u32),
}

impl MonthFilter {
    pub fn matches(&self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(m) => *m == month,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all months"),
            MonthFilter::Month(m) => f.write_str(month_name(*m)),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalise(s);
        if wanted == "all" {
            return Ok(MonthFilter::All);
        }
        FILTER_MONTHS
            .iter()
            .position(|m| *m == wanted)
            .map(|i| MonthFilter::Month(i as u32 + 1))
            .ok_or_else(|| BikeshareError::InvalidFilter {
                kind: "month",
                value: s.trim().to_string(),
            })
    }
}

// ── DayFilter ─────────────────────────────────────────────────────────────────

/// Day-of-week selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Day(Weekday),
}

impl DayFilter {
    pub fn matches(&self, day: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(d) => *d == day,
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all days"),
            DayFilter::Day(d) => f.write_str(weekday_name(*d)),
        }
    }
}

impl FromStr for DayFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalise(s);
        if wanted == "all" {
            return Ok(DayFilter::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|d| weekday_name(*d).to_lowercase() == wanted)
            .map(DayFilter::Day)
            .ok_or_else(|| BikeshareError::InvalidFilter {
                kind: "day",
                value: s.trim().to_string(),
            })
    }
}

// ── Filters ───────────────────────────────────────────────────────────────────

/// A validated city/month/day selection. Immutable once accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filters {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl Filters {
    pub fn new(city: City, month: MonthFilter, day: DayFilter) -> Self {
        Self { city, month, day }
    }

    /// `true` when `trip` passes both the month and the day selector.
    pub fn matches(&self, trip: &Trip) -> bool {
        self.month.matches(trip.month) && self.day.matches(trip.day_of_week)
    }
}

impl fmt::Display for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.city, self.month, self.day)
    }
}

// ── Trip ──────────────────────────────────────────────────────────────────────

/// A single trip row with its derived time parts.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    /// Trip length in seconds.
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    /// 1-based month of `start_time`.
    pub month: u32,
    pub day_of_week: Weekday,
    /// Hour of `start_time`, `0..=23`.
    pub hour: u32,
}

impl Trip {
    /// Build a trip with no optional fields, deriving month, weekday and
    /// hour from `start_time`.
    pub fn new(
        start_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        trip_duration: f64,
    ) -> Self {
        Self {
            start_time,
            end_time: None,
            trip_duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
            month: start_time.month(),
            day_of_week: start_time.weekday(),
            hour: start_time.hour(),
        }
    }

    /// Pair key used for the most-frequent-trip statistic.
    pub fn route(&self) -> String {
        format!("{} to {}", self.start_station, self.end_station)
    }
}

// ── TripTable ─────────────────────────────────────────────────────────────────

/// Which optional columns the source file carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnSet {
    pub end_time: bool,
    pub gender: bool,
    pub birth_year: bool,
}

/// Ordered trips for one city.
#[derive(Debug, Clone)]
pub struct TripTable {
    pub city: City,
    pub columns: ColumnSet,
    pub trips: Vec<Trip>,
}

impl TripTable {
    pub fn new(city: City, columns: ColumnSet, trips: Vec<Trip>) -> Self {
        Self {
            city,
            columns,
            trips,
        }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn has_gender(&self) -> bool {
        self.columns.gender
    }

    pub fn has_birth_year(&self) -> bool {
        self.columns.birth_year
    }

    /// Keep only the trips matching the month and day selectors of
    /// `filters`, preserving order. The city is not consulted.
    pub fn filter(self, filters: &Filters) -> Self {
        let trips = self
            .trips
            .into_iter()
            .filter(|t| filters.matches(t))
            .collect();
        Self { trips, ..self }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
