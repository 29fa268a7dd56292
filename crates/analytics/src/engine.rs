use crate::error::AnalyticsError;
use crate::report::{Report, WeeklyResult};
use crate::week::WeekBucket;
use configuration::AnalysisConfig;
use core_types::{Diagnostics, NormalizedRecord, RawTable, ReportOrder};
use normalizer::Normalizer;
use serde::Serialize;

/// A weekly report together with the warnings collected while producing it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analysis {
    pub report: Report,
    pub diagnostics: Diagnostics,
}

/// Bucketing state while walking the records newest-first.
enum BucketState<'a> {
    NoCurrentWeek,
    Accumulating(WeekBucket<'a>),
}

/// A stateless calculator turning daily records into per-week statistics.
#[derive(Debug, Clone, Default)]
pub struct WeeklyAnalyzer {
    config: AnalysisConfig,
}

impl WeeklyAnalyzer {
    /// Creates an analyzer, rejecting an admission threshold outside 1..=5 days.
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalyticsError> {
        if !(1..=5).contains(&config.min_days_per_week) {
            return Err(AnalyticsError::InvalidSettings(format!(
                "min_days_per_week must be between 1 and 5, got {}",
                config.min_days_per_week
            )));
        }
        Ok(Self { config })
    }

    /// Runs both engine stages over an extracted table.
    ///
    /// # Returns
    ///
    /// The `Analysis`, or the first fatal normalization error. No partial report
    /// is produced on failure.
    pub fn process_table(&self, table: &RawTable) -> Result<Analysis, AnalyticsError> {
        let normalized = Normalizer::new().normalize(table)?;
        let mut diagnostics = normalized.diagnostics;
        let report = self.aggregate(&normalized.records, &mut diagnostics);
        Ok(Analysis {
            report,
            diagnostics,
        })
    }

    /// Buckets records into Monday–Friday weeks and analyzes every week that
    /// holds at least `min_days_per_week` trading days.
    ///
    /// Records are walked newest-first; each bucket's window is anchored on the
    /// Monday of the first record that opens it, so weeks are discovered from the
    /// most recent one backwards. Weekend-dated records are skipped with a warning.
    pub fn aggregate(
        &self,
        records: &[NormalizedRecord],
        diagnostics: &mut Diagnostics,
    ) -> Report {
        let mut ordered: Vec<&NormalizedRecord> = Vec::with_capacity(records.len());
        for record in records {
            if record.day_of_week.is_weekend() {
                diagnostics.warn(
                    None,
                    None,
                    format!(
                        "Skipping record dated {} ({}): outside the Monday-Friday window",
                        record.date, record.day_of_week
                    ),
                );
                continue;
            }
            ordered.push(record);
        }
        ordered.sort_by(|a, b| b.date.cmp(&a.date));

        let mut results = Vec::new();
        let mut state = BucketState::NoCurrentWeek;

        for record in ordered {
            state = match state {
                BucketState::NoCurrentWeek => BucketState::Accumulating(WeekBucket::open(record)),
                BucketState::Accumulating(mut bucket) if bucket.contains(record.date) => {
                    bucket.push(record);
                    BucketState::Accumulating(bucket)
                }
                BucketState::Accumulating(bucket) => {
                    self.close_week(bucket, &mut results);
                    BucketState::Accumulating(WeekBucket::open(record))
                }
            };
        }
        if let BucketState::Accumulating(bucket) = state {
            self.close_week(bucket, &mut results);
        }

        if self.config.report_order == ReportOrder::Chronological {
            results.sort_by_key(|r| r.week_start);
        }

        tracing::info!(
            records = records.len(),
            weeks = results.len(),
            order = ?self.config.report_order,
            "Weekly aggregation complete."
        );
        if results.is_empty() {
            tracing::warn!("No complete weeks found in the data.");
        }
        Report::new(results)
    }

    /// Promotes a bucket to a result when it meets the admission threshold.
    fn close_week(&self, bucket: WeekBucket<'_>, results: &mut Vec<WeeklyResult>) {
        if bucket.len() < self.config.min_days_per_week {
            tracing::debug!(
                week_start = %bucket.week_start(),
                days = bucket.len(),
                "Dropping partial week."
            );
            return;
        }
        results.push(bucket.analyze(self.config.closed_day_streaks));
    }
}
