use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed schema every input header is normalized onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CanonicalColumn {
    Date,
    Open,
    High,
    Low,
    Close,
    Volume,
    #[serde(rename = "Change%")]
    ChangePct,
}

impl CanonicalColumn {
    pub const ALL: [CanonicalColumn; 7] = [
        CanonicalColumn::Date,
        CanonicalColumn::Open,
        CanonicalColumn::High,
        CanonicalColumn::Low,
        CanonicalColumn::Close,
        CanonicalColumn::Volume,
        CanonicalColumn::ChangePct,
    ];

    /// Columns the weekly engine cannot work without. Volume is optional.
    pub const REQUIRED: [CanonicalColumn; 6] = [
        CanonicalColumn::Date,
        CanonicalColumn::Open,
        CanonicalColumn::High,
        CanonicalColumn::Low,
        CanonicalColumn::Close,
        CanonicalColumn::ChangePct,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CanonicalColumn::Date => "Date",
            CanonicalColumn::Open => "Open",
            CanonicalColumn::High => "High",
            CanonicalColumn::Low => "Low",
            CanonicalColumn::Close => "Close",
            CanonicalColumn::Volume => "Volume",
            CanonicalColumn::ChangePct => "Change%",
        }
    }
}

impl fmt::Display for CanonicalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A calendar weekday, serialized with its full English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayName {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayName {
    /// The five trading weekdays, in chronological order.
    pub const WEEKDAYS: [DayName; 5] = [
        DayName::Monday,
        DayName::Tuesday,
        DayName::Wednesday,
        DayName::Thursday,
        DayName::Friday,
    ];

    /// Days since the Monday of the same week (Monday = 0).
    pub fn offset(&self) -> u32 {
        match self {
            DayName::Monday => 0,
            DayName::Tuesday => 1,
            DayName::Wednesday => 2,
            DayName::Thursday => 3,
            DayName::Friday => 4,
            DayName::Saturday => 5,
            DayName::Sunday => 6,
        }
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self, DayName::Saturday | DayName::Sunday)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DayName::Monday => "Monday",
            DayName::Tuesday => "Tuesday",
            DayName::Wednesday => "Wednesday",
            DayName::Thursday => "Thursday",
            DayName::Friday => "Friday",
            DayName::Saturday => "Saturday",
            DayName::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for DayName {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayName::Monday,
            Weekday::Tue => DayName::Tuesday,
            Weekday::Wed => DayName::Wednesday,
            Weekday::Thu => DayName::Thursday,
            Weekday::Fri => DayName::Friday,
            Weekday::Sat => DayName::Saturday,
            Weekday::Sun => DayName::Sunday,
        }
    }
}

impl fmt::Display for DayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordering of `Report::weekly_results`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportOrder {
    /// Ascending by week start.
    #[default]
    Chronological,
    /// The order weeks are discovered in: newest week first.
    MostRecentFirst,
}

/// How a market-closed placeholder day affects an in-progress streak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosedDayPolicy {
    /// The placeholder is evaluated like a flat day and ends the streak.
    #[default]
    Break,
    /// The placeholder is ignored; the streak resumes on the next open day.
    Skip,
}
