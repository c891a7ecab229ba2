//! Raw trip rows rendered as an aligned plain-text table.
//!
//! Column widths are measured in terminal cells so station names with
//! wide characters still line up.

use bikeshare_core::models::{ColumnSet, Trip};
use unicode_width::UnicodeWidthStr;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

struct Column {
    title: &'static str,
    align: Align,
    cell: fn(&Trip) -> String,
}

/// Columns shown for a table with the given optional columns.
fn columns_for(set: ColumnSet) -> Vec<Column> {
    let mut columns = vec![Column {
        title: "Start Time",
        align: Align::Left,
        cell: |t| t.start_time.format(TIMESTAMP_FORMAT).to_string(),
    }];
    if set.end_time {
        columns.push(Column {
            title: "End Time",
            align: Align::Left,
            cell: |t| {
                t.end_time
                    .map(|e| e.format(TIMESTAMP_FORMAT).to_string())
                    .unwrap_or_default()
            },
        });
    }
    columns.extend([
        Column {
            title: "Trip Duration",
            align: Align::Right,
            cell: |t| format_duration_cell(t.trip_duration),
        },
        Column {
            title: "Start Station",
            align: Align::Left,
            cell: |t| t.start_station.clone(),
        },
        Column {
            title: "End Station",
            align: Align::Left,
            cell: |t| t.end_station.clone(),
        },
        Column {
            title: "User Type",
            align: Align::Left,
            cell: |t| t.user_type.clone().unwrap_or_default(),
        },
    ]);
    if set.gender {
        columns.push(Column {
            title: "Gender",
            align: Align::Left,
            cell: |t| t.gender.clone().unwrap_or_default(),
        });
    }
    if set.birth_year {
        columns.push(Column {
            title: "Birth Year",
            align: Align::Right,
            cell: |t| t.birth_year.map(|y| y.to_string()).unwrap_or_default(),
        });
    }
    columns
}

/// Render `trips` as a table. Each row is labelled with its position in the
/// filtered table, starting from `offset`.
///
/// Output ends with a newline; an empty slice renders only the header.
pub fn format_rows(set: ColumnSet, trips: &[Trip], offset: usize) -> String {
    let columns = columns_for(set);

    let labels: Vec<String> = (offset..offset + trips.len()).map(|i| i.to_string()).collect();
    let cells: Vec<Vec<String>> = trips
        .iter()
        .map(|trip| columns.iter().map(|c| (c.cell)(trip)).collect())
        .collect();

    let label_width = labels.iter().map(|l| l.width()).max().unwrap_or(0);
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(c.title.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, &w)| pad(c.title, w, c.align))
        .collect();
    push_line(&mut out, &pad("", label_width, Align::Right), &header);

    for (label, row) in labels.iter().zip(&cells) {
        let line: Vec<String> = row
            .iter()
            .zip(columns.iter().zip(&widths))
            .map(|(cell, (c, &w))| pad(cell, w, c.align))
            .collect();
        push_line(&mut out, &pad(label, label_width, Align::Right), &line);
    }

    out
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Whole seconds when integral, otherwise one decimal place.
fn format_duration_cell(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        format!("{}", seconds as i64)
    } else {
        format!("{:.1}", seconds)
    }
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    match align {
        Align::Left => format!("{}{}", text, fill),
        Align::Right => format!("{}{}", fill, text),
    }
}

fn push_line(out: &mut String, label: &str, cells: &[String]) {
    let mut line = label.to_string();
    for cell in cells {
        line.push_str("  ");
        line.push_str(cell);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

// ── Tests ─────────────────────────────────────────────────────────────────────
