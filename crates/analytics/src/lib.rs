//! # Weekly Trading Analytics
//!
//! This crate turns extracted daily trading tables into weekly performance reports:
//! per-day changes, the cumulative intra-week trajectory, streaks, volatility and
//! turning points.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no file, network or process-wide state. Every call receives its
//!   whole input and returns its whole output, so independent calls may run in parallel.
//! - **Two stages:** the `normalizer` crate maps raw rows onto typed records; this crate
//!   buckets them into Monday–Friday weeks and computes one `WeeklyResult` per week.
//!
//! ## Public API
//!
//! - `WeeklyAnalyzer`: the bucketing engine (`process_table`, `aggregate`).
//! - `Report`, `WeeklyResult` and friends: the serializable output.
//! - `daily`: the simpler day-level summary.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod daily;
pub mod engine;
pub mod error;
pub mod report;
pub mod week;

// Re-export the key components to create a clean, public-facing API.
pub use daily::{DailyAnalysis, DailySummary};
pub use engine::{Analysis, WeeklyAnalyzer};
pub use error::AnalyticsError;
pub use report::{
    DailyProgress, DayExtreme, HighestPoint, Report, Streak, StreakDirection, Trend, Volatility,
    WeeklyResult,
};
