use crate::error::AnalyticsError;
use core_types::{DailyChange, Diagnostics, RawTable};
use normalizer::Normalizer;
use rust_decimal::Decimal;
use serde::Serialize;

/// Day-level split of positive and negative changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailySummary {
    /// Most recent first, like `data`.
    pub positive_changes: Vec<Decimal>,
    pub negative_changes: Vec<Decimal>,
    pub positive_count: usize,
    pub negative_count: usize,
    pub positive_avg: Decimal,
    pub negative_avg: Decimal,
    /// Every (date, change) pair, most recent first.
    pub data: Vec<DailyChange>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyAnalysis {
    pub summary: DailySummary,
    pub diagnostics: Diagnostics,
}

/// Normalizes a table that needs only Date and Change% and summarizes it.
pub fn process_table(table: &RawTable) -> Result<DailyAnalysis, AnalyticsError> {
    let series = Normalizer::new().normalize_changes(table)?;
    Ok(DailyAnalysis {
        summary: summarize(&series.changes),
        diagnostics: series.diagnostics,
    })
}

/// Summarizes daily changes; flat days count as neither positive nor negative.
pub fn summarize(changes: &[DailyChange]) -> DailySummary {
    let mut data = changes.to_vec();
    data.sort_by(|a, b| b.date.cmp(&a.date));

    let positive_changes: Vec<Decimal> = data
        .iter()
        .map(|c| c.change_pct)
        .filter(|c| *c > Decimal::ZERO)
        .collect();
    let negative_changes: Vec<Decimal> = data
        .iter()
        .map(|c| c.change_pct)
        .filter(|c| *c < Decimal::ZERO)
        .collect();

    tracing::debug!(
        days = data.len(),
        positive = positive_changes.len(),
        negative = negative_changes.len(),
        "Daily summary computed."
    );

    DailySummary {
        positive_count: positive_changes.len(),
        negative_count: negative_changes.len(),
        positive_avg: average(&positive_changes),
        negative_avg: average(&negative_changes),
        positive_changes,
        negative_changes,
        data,
    }
}

fn average(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        Decimal::ZERO
    } else {
        values.iter().sum::<Decimal>() / Decimal::from(values.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::Cell;
    use rust_decimal_macros::dec;

    fn change(d: u32, pct: Decimal) -> DailyChange {
        DailyChange {
            date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
            change_pct: pct,
        }
    }

    #[test]
    fn splits_and_averages() {
        let summary = summarize(&[
            change(15, dec!(1.0)),
            change(16, dec!(-2.0)),
            change(17, dec!(0)),
            change(18, dec!(3.0)),
        ]);
        assert_eq!(summary.positive_changes, vec![dec!(3.0), dec!(1.0)]);
        assert_eq!(summary.negative_changes, vec![dec!(-2.0)]);
        assert_eq!(summary.positive_count, 2);
        assert_eq!(summary.negative_count, 1);
        assert_eq!(summary.positive_avg, dec!(2));
        assert_eq!(summary.negative_avg, dec!(-2));
        assert_eq!(summary.data.first().map(|c| c.date.to_string()), Some("2024-01-18".to_string()));
    }

    #[test]
    fn empty_input_averages_to_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary, DailySummary::default());
    }

    #[test]
    fn processes_a_change_only_table() {
        let table = RawTable::from_rows(vec![
            vec![Cell::from("Date"), Cell::from("Change %")],
            vec![Cell::from("15/01/2024"), Cell::from("1.5%")],
            vec![Cell::from("16/01/2024"), Cell::from("bad")],
        ]);
        let analysis = process_table(&table).unwrap();
        assert_eq!(analysis.summary.positive_count, 1);
        assert_eq!(analysis.summary.data.len(), 2);
        assert_eq!(analysis.diagnostics.len(), 1);
    }
}
