use chrono::NaiveDate;
use core_types::DayName;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a single day's change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn of(change: Decimal) -> Self {
        if change > Decimal::ZERO {
            Trend::Up
        } else if change < Decimal::ZERO {
            Trend::Down
        } else {
            Trend::Flat
        }
    }

    pub fn arrow(&self) -> char {
        match self {
            Trend::Up => '↑',
            Trend::Down => '↓',
            Trend::Flat => '→',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakDirection {
    Positive,
    Negative,
}

impl StreakDirection {
    /// `None` for a flat (zero) change.
    pub fn of(change: Decimal) -> Option<Self> {
        match Trend::of(change) {
            Trend::Up => Some(StreakDirection::Positive),
            Trend::Down => Some(StreakDirection::Negative),
            Trend::Flat => None,
        }
    }
}

/// One weekday of a complete week, in chronological replay order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub day: DayName,
    pub date: NaiveDate,
    pub change: Decimal,
    /// Sum of `change` from Monday up to and including this day.
    pub cumulative: Decimal,
    pub trend: Trend,
    pub is_market_closed: bool,
    pub price_range: Decimal,
    pub range_pct: Decimal,
    pub high_change: Option<Decimal>,
    pub low_change: Option<Decimal>,
    pub high: Decimal,
    pub low: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighestPoint {
    pub day: DayName,
    pub value: Decimal,
}

/// Best or worst single day; `day` is `None` (and `value` zero) when the week
/// had no day of that sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayExtreme {
    pub day: Option<DayName>,
    pub value: Decimal,
}

impl Default for DayExtreme {
    fn default() -> Self {
        Self {
            day: None,
            value: Decimal::ZERO,
        }
    }
}

/// A run of consecutive same-signed days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub direction: Option<StreakDirection>,
    pub count: usize,
    pub days: Vec<DayName>,
}

impl Streak {
    pub fn start(direction: StreakDirection, day: DayName) -> Self {
        Self {
            direction: Some(direction),
            count: 1,
            days: vec![day],
        }
    }
}

/// The trading day with the widest intraday range, relative to its low.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Volatility {
    pub day: DayName,
    pub range_pct: Decimal,
    pub price_range: Decimal,
}

/// Statistics for one Monday–Friday week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyResult {
    /// Monday of the week.
    pub week_start: NaiveDate,
    /// Date of the latest trading record in the week; Friday for a full week.
    pub week_end: NaiveDate,
    /// Number of actual trading records in the week (market-closed days excluded).
    pub days_in_week: usize,
    pub avg_positive: Decimal,
    pub avg_negative: Decimal,
    pub best_day: DayExtreme,
    pub worst_day: DayExtreme,
    /// Always Monday..Friday, closed days included as placeholders.
    pub daily_progress: [DailyProgress; 5],
    pub final_change: Decimal,
    pub highest_point: HighestPoint,
    pub turned_positive: Option<DayName>,
    pub turned_negative: Option<DayName>,
    pub longest_streak: Streak,
    pub max_volatility: Volatility,
}

/// The output of a weekly analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub weekly_results: Vec<WeeklyResult>,
    pub total_weeks: usize,
}

impl Report {
    pub fn new(weekly_results: Vec<WeeklyResult>) -> Self {
        Self {
            total_weeks: weekly_results.len(),
            weekly_results,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weekly_results.is_empty()
    }
}
