use crate::enums::DayName;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One trading day after normalization, with its derived session metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    /// Zero when the column is absent or the cell could not be parsed.
    pub volume: Decimal,
    pub change_pct: Decimal,

    // --- Derived ---
    /// Close of the chronologically previous record; `None` for the earliest one.
    pub prev_close: Option<Decimal>,
    pub day_of_week: DayName,
    pub price_range: Decimal,
    /// `price_range / low * 100`, or zero when `low` is zero or the ratio overflows.
    pub range_pct: Decimal,
    pub high_change_pct: Option<Decimal>,
    pub low_change_pct: Option<Decimal>,
}

impl NormalizedRecord {
    /// Creates a record and derives everything that does not depend on its neighbours.
    pub fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
        change_pct: Decimal,
    ) -> Self {
        let price_range = high - low;
        let range_pct = price_range
            .checked_div(low)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO);

        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            change_pct,
            prev_close: None,
            day_of_week: DayName::from(date.weekday()),
            price_range,
            range_pct,
            high_change_pct: None,
            low_change_pct: None,
        }
    }

    /// Links the record to the previous session's close and derives the
    /// high/low moves relative to it.
    pub fn set_prev_close(&mut self, prev_close: Option<Decimal>) {
        self.prev_close = prev_close;
        self.high_change_pct = pct_move(self.high, prev_close);
        self.low_change_pct = pct_move(self.low, prev_close);
    }
}

fn pct_move(price: Decimal, base: Option<Decimal>) -> Option<Decimal> {
    let base = base?;
    price
        .checked_sub(base)?
        .checked_div(base)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// A date and its percentage change, as used by the daily-only summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyChange {
    pub date: NaiveDate,
    pub change_pct: Decimal,
}
