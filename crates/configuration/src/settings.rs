use core_types::{ClosedDayPolicy, ReportOrder};
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

/// Parameters of the weekly aggregation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// A week is reported only when it holds at least this many trading days.
    pub min_days_per_week: usize,
    /// Ordering of the weekly results in the final report.
    pub report_order: ReportOrder,
    /// Whether a market-closed placeholder ends an in-progress streak.
    pub closed_day_streaks: ClosedDayPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_days_per_week: 4,
            report_order: ReportOrder::Chronological,
            closed_day_streaks: ClosedDayPolicy::Break,
        }
    }
}

/// Where and how verbosely the binary logs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs go to a daily-rolling file in this directory instead of stderr.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
