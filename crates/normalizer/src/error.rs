use core_types::CanonicalColumn;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Missing required columns: {}", column_list(.missing))]
    Schema { missing: Vec<CanonicalColumn> },

    #[error("Could not parse date value '{value}' in row {row}")]
    DateParse { row: usize, value: String },

    #[error("Could not convert {column} value '{value}' in row {row} to a number")]
    InvalidNumber {
        row: usize,
        column: CanonicalColumn,
        value: String,
    },
}

fn column_list(columns: &[CanonicalColumn]) -> String {
    columns
        .iter()
        .map(CanonicalColumn::name)
        .collect::<Vec<_>>()
        .join(", ")
}
