//! Five-rows-at-a-time display of the filtered trip table.

use std::io::{BufRead, Write};

use bikeshare_core::error::Result;
use bikeshare_core::models::{Trip, TripTable};
use tracing::debug;

use crate::console::Console;
use crate::table_view::format_rows;

/// Rows shown per page.
pub const PAGE_SIZE: usize = 5;

// ── Pager ─────────────────────────────────────────────────────────────────────

/// Walks a slice of trips in consecutive, non-overlapping pages.
#[derive(Debug)]
pub struct Pager<'a> {
    trips: &'a [Trip],
    next: usize,
    page_size: usize,
}

impl<'a> Pager<'a> {
    pub fn new(trips: &'a [Trip]) -> Self {
        Self::with_page_size(trips, PAGE_SIZE)
    }

    /// A zero page size is treated as one row per page.
    pub fn with_page_size(trips: &'a [Trip], page_size: usize) -> Self {
        Self {
            trips,
            next: 0,
            page_size: page_size.max(1),
        }
    }

    /// The next page and the table position of its first row.
    ///
    /// The last page may be shorter than the page size. `None` once every
    /// row has been returned.
    pub fn next_page(&mut self) -> Option<(usize, &'a [Trip])> {
        if self.is_exhausted() {
            return None;
        }
        let start = self.next;
        let end = (start + self.page_size).min(self.trips.len());
        self.next = end;
        Some((start, &self.trips[start..end]))
    }

    pub fn is_exhausted(&self) -> bool {
        self.next >= self.trips.len()
    }

    /// Rows not yet returned.
    pub fn remaining(&self) -> usize {
        self.trips.len() - self.next
    }
}

// ── Interactive paging ────────────────────────────────────────────────────────

/// Offer the table's raw rows page by page until the user says no or the
/// rows run out. Returns the number of pages shown.
pub fn page_raw_data<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    table: &TripTable,
) -> Result<usize> {
    if table.is_empty() {
        console.say("\nThere is no raw data to display for this selection.")?;
        return Ok(0);
    }

    let mut pager = Pager::new(&table.trips);
    let mut shown = 0usize;

    loop {
        let question = if shown == 0 {
            format!("\nWould you like to see {} rows of raw data? (yes/no): ", PAGE_SIZE)
        } else {
            format!(
                "\nWould you like to see the next {} rows of raw data? (yes/no): ",
                PAGE_SIZE
            )
        };

        match console.confirm(&question)? {
            Some(true) => {}
            Some(false) => {
                console.say("That is the end of the raw data.")?;
                break;
            }
            None => break,
        }

        if let Some((offset, page)) = pager.next_page() {
            let rendered = format_rows(table.columns, page, offset);
            write!(console.output(), "{}", rendered)?;
            shown += 1;
        }

        if pager.is_exhausted() {
            console.say("No more rows to display.")?;
            break;
        }
    }

    debug!("Showed {} pages of raw data", shown);
    Ok(shown)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::{City, ColumnSet};
    use chrono::{Duration, NaiveDate};
    use std::io::Cursor;

    fn trips(n: usize) -> Vec<Trip> {
        let base = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..n)
            .map(|i| {
                Trip::new(
                    base + Duration::minutes(i as i64),
                    format!("S{}", i),
                    "End",
                    60.0,
                )
            })
            .collect()
    }

    fn table(n: usize) -> TripTable {
        TripTable::new(City::Washington, ColumnSet::default(), trips(n))
    }

    fn run(n: usize, input: &str) -> (usize, String) {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let shown = page_raw_data(&mut console, &table(n)).unwrap();
        (shown, String::from_utf8(console.into_output()).unwrap())
    }

    // ── Pager ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_pager_covers_every_row_once() {
        for n in [0usize, 1, 4, 5, 6, 10, 12] {
            let rows = trips(n);
            let mut pager = Pager::new(&rows);
            let mut seen = Vec::new();
            let mut pages = 0;
            while let Some((offset, page)) = pager.next_page() {
                assert_eq!(offset, seen.len());
                assert!(!page.is_empty() && page.len() <= PAGE_SIZE);
                seen.extend(page.iter().map(|t| t.start_station.clone()));
                pages += 1;
            }
            assert_eq!(pages, n.div_ceil(PAGE_SIZE), "n = {}", n);
            let expected: Vec<String> = rows.iter().map(|t| t.start_station.clone()).collect();
            assert_eq!(seen, expected);
        }
    }

    #[test]
    fn test_pager_short_final_page() {
        let rows = trips(7);
        let mut pager = Pager::new(&rows);
        assert_eq!(pager.next_page().unwrap().1.len(), 5);
        assert_eq!(pager.remaining(), 2);
        let (offset, last) = pager.next_page().unwrap();
        assert_eq!((offset, last.len()), (5, 2));
        assert!(pager.next_page().is_none());
    }

    #[test]
    fn test_pager_zero_page_size() {
        let rows = trips(2);
        let mut pager = Pager::with_page_size(&rows, 0);
        assert_eq!(pager.next_page().unwrap().1.len(), 1);
    }

    // ── page_raw_data ─────────────────────────────────────────────────────────

    #[test]
    fn test_page_raw_data_decline_immediately() {
        let (shown, out) = run(12, "no\n");
        assert_eq!(shown, 0);
        assert!(out.contains("That is the end of the raw data."));
        assert!(!out.contains("S0"));
    }

    #[test]
    fn test_page_raw_data_one_page_then_decline() {
        let (shown, out) = run(12, "yes\nno\nyes\n");
        assert_eq!(shown, 1);
        assert!(out.contains("S4"));
        assert!(!out.contains("S5"));
        assert!(out.contains("Would you like to see the next 5 rows of raw data?"));
    }

    #[test]
    fn test_page_raw_data_until_exhausted() {
        let (shown, out) = run(12, "yes\nyes\nyes\n");
        assert_eq!(shown, 3);
        assert!(out.contains("S11"));
        assert!(out.contains("No more rows to display."));
        // No question is asked after the last page.
        assert_eq!(out.matches("(yes/no)").count(), 3);
    }

    #[test]
    fn test_page_raw_data_reasks_on_unclear_answer() {
        let (shown, out) = run(3, "sure\nYES\n");
        assert_eq!(shown, 1);
        assert!(out.contains("Please answer yes or no."));
    }

    #[test]
    fn test_page_raw_data_end_of_input() {
        let (shown, _) = run(12, "yes\n");
        assert_eq!(shown, 1);
    }

    #[test]
    fn test_page_raw_data_empty_table() {
        let (shown, out) = run(0, "yes\n");
        assert_eq!(shown, 0);
        assert!(out.contains("no raw data"));
        assert!(!out.contains("(yes/no)"));
    }
}
