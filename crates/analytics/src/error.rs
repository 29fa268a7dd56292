use normalizer::NormalizeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Failed to normalize the input table: {0}")]
    Normalization(#[from] NormalizeError),

    #[error("Invalid analysis settings: {0}")]
    InvalidSettings(String),
}
