//! Interactive session loop.
//!
//! Drives `CollectFilters → Load → Report → Paginate → AskRestart`, going
//! back to `CollectFilters` when the user asks to restart. End of input at
//! any prompt ends the session.

use std::io::{BufRead, Write};

use bikeshare_core::error::Result;
use bikeshare_core::models::{City, DayFilter, Filters, MonthFilter, TripTable};
use bikeshare_data::analysis::analyze_trips;
use bikeshare_data::reader::TripSource;
use tracing::info;

use crate::console::{is_yes, Console};
use crate::pager::page_raw_data;
use crate::report::{render_analysis, ReportOptions};

const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
const CITY_QUESTION: &str =
    "Which city would you like to get data from? Chicago, New York City or Washington?: ";
const MONTH_QUESTION: &str =
    "Should the data be for all months or a specific month (January to June)?: ";
const DAY_QUESTION: &str = "Which day of the week (Monday to Sunday, or all)?: ";
const RESTART_QUESTION: &str = "\nWould you like to restart? Enter yes or no.\n";

/// Where the session loop currently is.
#[derive(Debug)]
enum State {
    CollectFilters,
    Load(Filters),
    Report(TripTable),
    Paginate(TripTable),
    AskRestart,
    Done,
}

/// The interactive explorer, generic over where trip tables come from.
pub struct App<'a, S: TripSource> {
    source: &'a S,
    options: ReportOptions,
}

impl<'a, S: TripSource> App<'a, S> {
    pub fn new(source: &'a S, options: ReportOptions) -> Self {
        Self { source, options }
    }

    /// Run sessions until the user declines to restart or input ends.
    ///
    /// Returns the number of tables that were loaded and reported. A load
    /// failure ends the loop with that error.
    pub fn run<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<usize> {
        let mut state = State::CollectFilters;
        let mut reported = 0usize;

        loop {
            state = match state {
                State::CollectFilters => match collect_filters(console)? {
                    Some(filters) => State::Load(filters),
                    None => State::Done,
                },
                State::Load(filters) => {
                    info!("Loading trips for {}", filters);
                    State::Report(self.source.load(&filters)?)
                }
                State::Report(table) => {
                    let analysis = analyze_trips(&table);
                    render_analysis(console.output(), &analysis, self.options)?;
                    reported += 1;
                    State::Paginate(table)
                }
                State::Paginate(table) => {
                    page_raw_data(console, &table)?;
                    if console.is_closed() {
                        State::Done
                    } else {
                        State::AskRestart
                    }
                }
                State::AskRestart => match console.ask(RESTART_QUESTION)? {
                    Some(answer) if is_yes(&answer) => State::CollectFilters,
                    _ => State::Done,
                },
                State::Done => break,
            };
        }

        info!("Session finished after {} reports", reported);
        Ok(reported)
    }
}

/// Ask for city, month and day, re-asking each until it is valid.
///
/// Returns `None` at end of input.
pub fn collect_filters<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<Option<Filters>> {
    console.say(GREETING)?;

    let Some(city) = console.ask_until::<City>(
        CITY_QUESTION,
        "Sorry, that is not a valid city. Try again!",
    )?
    else {
        return Ok(None);
    };
    let Some(month) = console.ask_until::<MonthFilter>(
        MONTH_QUESTION,
        "Sorry, that is not a valid month. Try again!",
    )?
    else {
        return Ok(None);
    };
    let Some(day) =
        console.ask_until::<DayFilter>(DAY_QUESTION, "Sorry, that is not a valid day. Try again!")?
    else {
        return Ok(None);
    };

    console.say(&"-".repeat(40))?;
    Ok(Some(Filters::new(city, month, day)))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::error::BikeshareError;
    use bikeshare_core::models::{ColumnSet, Trip};
    use bikeshare_core::settings::CityFiles;
    use bikeshare_data::reader::CsvTripSource;
    use chrono::{NaiveDate, Weekday};
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::path::PathBuf;

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// In-memory source that records every selection it is asked for.
    struct FakeSource {
        trips: Vec<Trip>,
        requests: RefCell<Vec<Filters>>,
    }

    impl FakeSource {
        fn new(n: usize) -> Self {
            let start = NaiveDate::from_ymd_opt(2017, 6, 5)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap();
            Self {
                trips: (0..n)
                    .map(|i| Trip::new(start, format!("Station {}", i), "Depot", 600.0))
                    .collect(),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl TripSource for FakeSource {
        fn load(&self, filters: &Filters) -> Result<TripTable> {
            self.requests.borrow_mut().push(*filters);
            let table = TripTable::new(filters.city, ColumnSet::default(), self.trips.clone());
            Ok(table.filter(filters))
        }
    }

    struct FailingSource;

    impl TripSource for FailingSource {
        fn load(&self, _filters: &Filters) -> Result<TripTable> {
            Err(BikeshareError::FileRead {
                path: PathBuf::from("chicago.csv"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            })
        }
    }

    const QUIET: ReportOptions = ReportOptions { show_timing: false };

    fn run_app<S: TripSource>(source: &S, input: &str) -> (Result<usize>, String) {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let result = App::new(source, QUIET).run(&mut console);
        (result, String::from_utf8(console.into_output()).unwrap())
    }

    // ── collect_filters ───────────────────────────────────────────────────────

    #[test]
    fn test_collect_filters_rejects_invalid_city() {
        let mut console = Console::new(
            Cursor::new(b"chigaco\nChicago\nall\nMonday\n".to_vec()),
            Vec::new(),
        );
        let filters = collect_filters(&mut console).unwrap().unwrap();
        assert_eq!(
            filters,
            Filters::new(City::Chicago, MonthFilter::All, DayFilter::Day(Weekday::Mon))
        );

        let out = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(out.matches(CITY_QUESTION).count(), 2);
        assert!(out.contains("Sorry, that is not a valid city. Try again!"));
    }

    #[test]
    fn test_collect_filters_reprompts_month_and_day() {
        let mut console = Console::new(
            Cursor::new(b"washington\njuly\nMarch\nsomeday\nall\n".to_vec()),
            Vec::new(),
        );
        let filters = collect_filters(&mut console).unwrap().unwrap();
        assert_eq!(filters.month, MonthFilter::Month(3));
        assert_eq!(filters.day, DayFilter::All);

        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("Sorry, that is not a valid month. Try again!"));
        assert!(out.contains("Sorry, that is not a valid day. Try again!"));
    }

    #[test]
    fn test_collect_filters_end_of_input() {
        let mut console = Console::new(Cursor::new(b"chicago\n".to_vec()), Vec::new());
        assert!(collect_filters(&mut console).unwrap().is_none());
    }

    // ── App::run ──────────────────────────────────────────────────────────────

    #[test]
    fn test_run_single_session() {
        let source = FakeSource::new(3);
        let (result, out) = run_app(&source, "chicago\nall\nall\nno\nno\n");

        assert_eq!(result.unwrap(), 1);
        assert_eq!(source.requests.borrow().len(), 1);
        assert!(out.contains("Calculating The Most Frequent Times of Travel..."));
        assert!(out.contains("Calculating User Stats..."));
        assert!(out.contains("The most commonly used start station is Station 0 with a count of 1"));
        assert!(out.contains("Would you like to restart?"));
    }

    #[test]
    fn test_run_restart_loads_fresh_table() {
        let source = FakeSource::new(2);
        let input = "chicago\nall\nall\nno\nYes\nwashington\njune\nmonday\nno\nno\n";
        let (result, _) = run_app(&source, input);

        assert_eq!(result.unwrap(), 2);
        let requests = source.requests.borrow();
        assert_eq!(requests[0].city, City::Chicago);
        assert_eq!(
            requests[1],
            Filters::new(
                City::Washington,
                MonthFilter::Month(6),
                DayFilter::Day(Weekday::Mon)
            )
        );
    }

    #[test]
    fn test_run_restart_requires_yes() {
        let source = FakeSource::new(1);
        let (result, out) = run_app(&source, "chicago\nall\nall\nno\ny\nchicago\n");

        assert_eq!(result.unwrap(), 1);
        assert_eq!(out.matches(GREETING).count(), 1);
    }

    #[test]
    fn test_run_pages_raw_rows() {
        let source = FakeSource::new(7);
        let (result, out) = run_app(&source, "chicago\nall\nall\nyes\nyes\nno\n");

        assert_eq!(result.unwrap(), 1);
        assert!(out.contains("Station 6"));
        assert!(out.contains("No more rows to display."));
    }

    #[test]
    fn test_run_empty_selection_reports_no_trips() {
        let source = FakeSource::new(4);
        // All fake trips fall on a Monday in June.
        let (result, out) = run_app(&source, "chicago\njanuary\nall\nno\n");

        assert_eq!(result.unwrap(), 1);
        assert!(out.contains("No trips match the selected filters."));
        assert!(out.contains("There is no raw data to display"));
    }

    #[test]
    fn test_run_end_of_input_before_filters() {
        let source = FakeSource::new(1);
        let (result, _) = run_app(&source, "");
        assert_eq!(result.unwrap(), 0);
        assert!(source.requests.borrow().is_empty());
    }

    #[test]
    fn test_run_load_failure_is_fatal() {
        let (result, _) = run_app(&FailingSource, "chicago\nall\nall\n");
        let err = result.unwrap_err();
        assert!(matches!(err, BikeshareError::FileRead { .. }));
    }

    #[test]
    fn test_run_washington_from_csv_lacks_demographics() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("washington.csv"),
            ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n\
             0,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber\n\
             1,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber\n",
        )
        .unwrap();
        let source = CsvTripSource::new(CityFiles::in_dir(dir.path()));

        let (result, out) = run_app(&source, "Washington\nall\nall\nno\nno\n");
        assert_eq!(result.unwrap(), 1);
        assert!(out.contains("No gender data available for this city"));
        assert!(out.contains("Birth year data is unavailable for this city"));
        assert!(out.contains("Subscriber  2"));
    }
}
