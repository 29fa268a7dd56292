use crate::report::{
    DailyProgress, DayExtreme, HighestPoint, Streak, StreakDirection, Trend, Volatility,
    WeeklyResult,
};
use chrono::{Datelike, Duration, NaiveDate};
use core_types::{ClosedDayPolicy, DayName, NormalizedRecord};
use rust_decimal::Decimal;

/// Length of the Monday-start window a bucket covers.
pub const WEEK_WINDOW_DAYS: i64 = 5;

/// Monday of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The actual trading records that fall within one Monday-start, 5-day window.
#[derive(Debug, Clone)]
pub struct WeekBucket<'a> {
    week_start: NaiveDate,
    records: Vec<&'a NormalizedRecord>,
}

impl<'a> WeekBucket<'a> {
    /// Opens the bucket for the week of `first`.
    pub fn open(first: &'a NormalizedRecord) -> Self {
        Self {
            week_start: monday_of(first.date),
            records: vec![first],
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.week_start && date < self.week_start + Duration::days(WEEK_WINDOW_DAYS)
    }

    pub fn push(&mut self, record: &'a NormalizedRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    /// Computes the statistics bundle of this week.
    pub fn analyze(&self, closed_days: ClosedDayPolicy) -> WeeklyResult {
        CompleteWeek::from_bucket(self).analyze(self.records.len(), closed_days)
    }
}

/// A weekday of a complete week; `record` is `None` when the market was closed.
#[derive(Debug, Clone, Copy)]
struct DaySlot<'a> {
    day: DayName,
    date: NaiveDate,
    record: Option<&'a NormalizedRecord>,
}

impl DaySlot<'_> {
    fn change(&self) -> Decimal {
        self.record.map_or(Decimal::ZERO, |r| r.change_pct)
    }

    fn progress(&self, cumulative: Decimal) -> DailyProgress {
        let change = self.change();
        match self.record {
            Some(r) => DailyProgress {
                day: self.day,
                date: self.date,
                change,
                cumulative,
                trend: Trend::of(change),
                is_market_closed: false,
                price_range: r.price_range,
                range_pct: r.range_pct,
                high_change: r.high_change_pct,
                low_change: r.low_change_pct,
                high: r.high,
                low: r.low,
            },
            None => DailyProgress {
                day: self.day,
                date: self.date,
                change,
                cumulative,
                trend: Trend::Flat,
                is_market_closed: true,
                price_range: Decimal::ZERO,
                range_pct: Decimal::ZERO,
                high_change: Some(Decimal::ZERO),
                low_change: Some(Decimal::ZERO),
                high: Decimal::ZERO,
                low: Decimal::ZERO,
            },
        }
    }
}

/// A bucket padded to exactly five weekdays.
struct CompleteWeek<'a> {
    week_start: NaiveDate,
    slots: [DaySlot<'a>; 5],
}

impl<'a> CompleteWeek<'a> {
    fn from_bucket(bucket: &WeekBucket<'a>) -> Self {
        let week_start = bucket.week_start;
        let slots = DayName::WEEKDAYS.map(|day| {
            let date = week_start + Duration::days(i64::from(day.offset()));
            DaySlot {
                day,
                date,
                record: bucket.records.iter().copied().find(|r| r.date == date),
            }
        });
        Self { week_start, slots }
    }

    /// Trading days only, Monday to Friday.
    fn open_days(&self) -> impl Iterator<Item = (DayName, &'a NormalizedRecord)> + '_ {
        self.slots
            .iter()
            .filter_map(|slot| slot.record.map(|r| (slot.day, r)))
    }

    fn analyze(&self, days_in_week: usize, closed_days: ClosedDayPolicy) -> WeeklyResult {
        // Chronological replay.
        let mut cumulative = Decimal::ZERO;
        let mut turned_positive = None;
        let mut turned_negative = None;
        let mut streaks = StreakTracker::default();

        let daily_progress = self.slots.map(|slot| {
            cumulative += slot.change();
            if turned_positive.is_none() && cumulative > Decimal::ZERO {
                turned_positive = Some(slot.day);
            }
            if turned_negative.is_none() && cumulative < Decimal::ZERO {
                turned_negative = Some(slot.day);
            }
            match (slot.record, closed_days) {
                (Some(r), _) => streaks.observe(slot.day, r.change_pct),
                (None, ClosedDayPolicy::Break) => streaks.observe(slot.day, Decimal::ZERO),
                (None, ClosedDayPolicy::Skip) => {}
            }
            slot.progress(cumulative)
        });

        let mut highest_point = HighestPoint {
            day: daily_progress[0].day,
            value: daily_progress[0].cumulative,
        };
        for progress in &daily_progress[1..] {
            if progress.cumulative > highest_point.value {
                highest_point = HighestPoint {
                    day: progress.day,
                    value: progress.cumulative,
                };
            }
        }

        let (best_day, worst_day) = self.extremes();
        let (avg_positive, avg_negative) = self.averages();

        WeeklyResult {
            week_start: self.week_start,
            week_end: self.last_trading_date(),
            days_in_week,
            avg_positive,
            avg_negative,
            best_day,
            worst_day,
            daily_progress,
            final_change: cumulative,
            highest_point,
            turned_positive,
            turned_negative,
            longest_streak: streaks.finish(),
            max_volatility: self.max_volatility(),
        }
    }

    /// Date of the latest actual record. Only an empty week falls back to Friday.
    fn last_trading_date(&self) -> NaiveDate {
        self.open_days()
            .map(|(_, r)| r.date)
            .max()
            .unwrap_or(self.week_start + Duration::days(WEEK_WINDOW_DAYS - 1))
    }

    /// Largest gain and largest loss among trading days; the earlier day wins ties.
    fn extremes(&self) -> (DayExtreme, DayExtreme) {
        let mut best = DayExtreme::default();
        let mut worst = DayExtreme::default();
        for (day, record) in self.open_days() {
            let change = record.change_pct;
            if change > best.value {
                best = DayExtreme {
                    day: Some(day),
                    value: change,
                };
            }
            if change < worst.value {
                worst = DayExtreme {
                    day: Some(day),
                    value: change,
                };
            }
        }
        (best, worst)
    }

    fn averages(&self) -> (Decimal, Decimal) {
        let (positive, negative): (Vec<Decimal>, Vec<Decimal>) = self
            .open_days()
            .map(|(_, r)| r.change_pct)
            .filter(|c| !c.is_zero())
            .partition(|c| c.is_sign_positive());
        (mean(&positive), mean(&negative))
    }

    /// Widest `range_pct` among trading days. A bucket always holds at least one
    /// record, so the Monday fallback only applies to an empty week.
    fn max_volatility(&self) -> Volatility {
        let mut widest: Option<Volatility> = None;
        for (day, record) in self.open_days() {
            if widest.as_ref().is_none_or(|w| record.range_pct > w.range_pct) {
                widest = Some(Volatility {
                    day,
                    range_pct: record.range_pct,
                    price_range: record.price_range,
                });
            }
        }
        widest.unwrap_or(Volatility {
            day: DayName::Monday,
            range_pct: Decimal::ZERO,
            price_range: Decimal::ZERO,
        })
    }
}

fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    values.iter().sum::<Decimal>() / Decimal::from(values.len())
}

/// Tracks the in-progress and the longest same-signed run during replay.
#[derive(Debug, Default)]
struct StreakTracker {
    current: Streak,
    longest: Streak,
}

impl StreakTracker {
    /// A zero change ends the current run just like a sign flip does.
    fn observe(&mut self, day: DayName, change: Decimal) {
        match StreakDirection::of(change) {
            Some(direction) if self.current.direction == Some(direction) => {
                self.current.count += 1;
                self.current.days.push(day);
            }
            Some(direction) => {
                self.close_current();
                self.current = Streak::start(direction, day);
            }
            None => self.close_current(),
        }
    }

    /// Only a strictly longer run replaces the longest one, so ties keep the earlier.
    fn close_current(&mut self) {
        let finished = std::mem::take(&mut self.current);
        if finished.count > self.longest.count {
            self.longest = finished;
        }
    }

    fn finish(mut self) -> Streak {
        self.close_current();
        self.longest
    }
}
