//! Plain-text rendering of the four statistics reports.

use std::io::Write;
use std::time::Duration;

use bikeshare_core::formatting::{format_count, format_duration, whole_seconds};
use bikeshare_core::models::{month_name, weekday_name};
use bikeshare_data::analysis::{
    BirthYearReport, DurationStats, StationStats, TimeStats, TripAnalysis, UserStats,
};

const RULE_WIDTH: usize = 40;

/// Presentation switches for the reports.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Print each report's execution time.
    pub show_timing: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { show_timing: true }
    }
}

/// Write all four reports in order.
pub fn render_analysis<W: Write>(
    out: &mut W,
    analysis: &TripAnalysis,
    options: ReportOptions,
) -> std::io::Result<()> {
    render_time_stats(out, &analysis.times, options)?;
    render_station_stats(out, &analysis.stations, options)?;
    render_duration_stats(out, &analysis.durations, options)?;
    render_user_stats(out, &analysis.users, options)
}

pub fn render_time_stats<W: Write>(
    out: &mut W,
    stats: &TimeStats,
    options: ReportOptions,
) -> std::io::Result<()> {
    writeln!(out, "\nCalculating The Most Frequent Times of Travel...\n")?;

    match (&stats.month, &stats.day_of_week, &stats.hour) {
        (Some(month), Some(day), Some(hour)) => {
            writeln!(
                out,
                "The most common month of travel is {} ({} trips)",
                month_name(month.value),
                format_count(month.count)
            )?;
            writeln!(
                out,
                "The most common day of travel is {} ({} trips)",
                weekday_name(day.value),
                format_count(day.count)
            )?;
            writeln!(
                out,
                "The most common hour of travel is {:02}:00 ({} trips)",
                hour.value,
                format_count(hour.count)
            )?;
        }
        _ => no_trips(out)?,
    }

    footer(out, stats.elapsed, options)
}

pub fn render_station_stats<W: Write>(
    out: &mut W,
    stats: &StationStats,
    options: ReportOptions,
) -> std::io::Result<()> {
    writeln!(out, "\nCalculating The Most Popular Stations and Trip...\n")?;

    match (&stats.start_station, &stats.end_station, &stats.trip) {
        (Some(start), Some(end), Some(trip)) => {
            writeln!(
                out,
                "The most commonly used start station is {} with a count of {}",
                start.value,
                format_count(start.count)
            )?;
            writeln!(
                out,
                "The most commonly used end station is {} with a count of {}",
                end.value,
                format_count(end.count)
            )?;
            writeln!(
                out,
                "The most frequent trip is {} with a count of {}",
                trip.value,
                format_count(trip.count)
            )?;
        }
        _ => no_trips(out)?,
    }

    footer(out, stats.elapsed, options)
}

pub fn render_duration_stats<W: Write>(
    out: &mut W,
    stats: &DurationStats,
    options: ReportOptions,
) -> std::io::Result<()> {
    writeln!(out, "\nCalculating Trip Duration...\n")?;

    match stats.mean_seconds {
        Some(mean) => {
            writeln!(
                out,
                "The total travel time is: {}",
                format_duration(whole_seconds(stats.total_seconds))
            )?;
            writeln!(
                out,
                "The average trip duration is: {}",
                format_duration(whole_seconds(mean))
            )?;
        }
        None => no_trips(out)?,
    }

    footer(out, stats.elapsed, options)
}

pub fn render_user_stats<W: Write>(
    out: &mut W,
    stats: &UserStats,
    options: ReportOptions,
) -> std::io::Result<()> {
    writeln!(out, "\nCalculating User Stats...\n")?;

    writeln!(out, "The categories of users and the count of each are:")?;
    write_counts(out, &stats.user_types)?;

    match &stats.genders {
        Some(genders) => {
            writeln!(out, "\nThe number of users for each gender are:")?;
            write_counts(out, genders)?;
        }
        None => writeln!(out, "\nNo gender data available for this city")?,
    }

    match &stats.birth_years {
        BirthYearReport::Years(years) => {
            writeln!(out, "\nThe earliest year of birth is {}", years.earliest)?;
            writeln!(out, "The most recent year of birth is {}", years.most_recent)?;
            writeln!(
                out,
                "Most of the users were born in the year {}",
                years.most_common.value
            )?;
        }
        BirthYearReport::NoValues => {
            writeln!(out, "\nNo birth year values recorded for the selected trips")?
        }
        BirthYearReport::Unavailable => {
            writeln!(out, "\nBirth year data is unavailable for this city")?
        }
    }

    footer(out, stats.elapsed, options)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn write_counts<W: Write>(out: &mut W, counts: &[(String, u64)]) -> std::io::Result<()> {
    if counts.is_empty() {
        return writeln!(out, "  (none recorded)");
    }
    let width = counts.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    for (key, count) in counts {
        writeln!(out, "  {:<width$}  {}", key, format_count(*count), width = width)?;
    }
    Ok(())
}

fn no_trips<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "No trips match the selected filters.")
}

fn footer<W: Write>(out: &mut W, elapsed: Duration, options: ReportOptions) -> std::io::Result<()> {
    if options.show_timing {
        writeln!(out, "\nThis took {:.6} seconds.", elapsed.as_secs_f64())?;
    }
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
