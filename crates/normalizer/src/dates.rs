use chrono::{Datelike, NaiveDate, NaiveDateTime};
use core_types::Cell;

/// One attempt at reading a date cell.
#[derive(Debug, Clone, Copy)]
pub struct DateParser {
    pub name: &'static str,
    format: &'static str,
    with_time: bool,
}

impl DateParser {
    const fn date(name: &'static str, format: &'static str) -> Self {
        Self {
            name,
            format,
            with_time: false,
        }
    }

    const fn date_time(name: &'static str, format: &'static str) -> Self {
        Self {
            name,
            format,
            with_time: true,
        }
    }

    /// chrono's `%Y` also accepts one to three digits, so a four-digit year format
    /// rejects years below 1000 and leaves "15/01/24" to the two-digit parsers.
    pub fn parse(&self, text: &str) -> Option<NaiveDate> {
        let date = if self.with_time {
            NaiveDateTime::parse_from_str(text, self.format)
                .ok()
                .map(|dt| dt.date())
        } else {
            NaiveDate::parse_from_str(text, self.format).ok()
        }?;
        if self.format.contains("%Y") && date.year() < MIN_FOUR_DIGIT_YEAR {
            return None;
        }
        Some(date)
    }
}

const MIN_FOUR_DIGIT_YEAR: i32 = 1000;

/// The ordered date attempts; the first parser that accepts a value wins.
///
/// Day-first comes before anything else, followed by the common export layouts
/// and the two-digit-year forms, with plain ISO dates last.
pub const DATE_PARSERS: &[DateParser] = &[
    DateParser::date("day-first", "%d/%m/%Y"),
    DateParser::date("month-first", "%m/%d/%Y"),
    DateParser::date("month-name", "%b %d, %Y"),
    DateParser::date("day-month-name", "%d %b %Y"),
    DateParser::date("dotted", "%d.%m.%Y"),
    DateParser::date("year-first-slashed", "%Y/%m/%d"),
    DateParser::date("day-first-short-year", "%d/%m/%y"),
    DateParser::date("month-first-short-year", "%m/%d/%y"),
    DateParser::date_time("iso-datetime", "%Y-%m-%d %H:%M:%S"),
    DateParser::date_time("iso-datetime-t", "%Y-%m-%dT%H:%M:%S"),
    DateParser::date("iso", "%Y-%m-%d"),
];

/// Parses a date cell, `None` when it is blank or no parser accepts it.
pub fn parse_date(cell: &Cell) -> Option<NaiveDate> {
    let text = cell.as_text()?;
    DATE_PARSERS.iter().find_map(|parser| {
        let parsed = parser.parse(&text);
        if parsed.is_some() {
            tracing::trace!(parser = parser.name, value = %text, "Parsed date.");
        }
        parsed
    })
}
