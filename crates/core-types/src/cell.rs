use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// One untyped value from an extracted table.
///
/// Extractors hand over whatever they found: spreadsheet readers produce numbers,
/// PDF and CSV readers mostly produce text, and blank cells become `Empty`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Builds a cell from raw text, mapping blank strings to `Empty`.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(text)
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(n) => n.is_nan(),
        }
    }

    /// The trimmed textual form of the cell, `None` when blank.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            _ if self.is_blank() => None,
            Cell::Text(s) => Some(Cow::Borrowed(s.trim())),
            Cell::Number(n) => Some(Cow::Owned(n.to_string())),
            Cell::Empty => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::from_text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::from_text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Empty, Into::into)
    }
}

static EMPTY: Cell = Cell::Empty;

/// A single extracted table: a header row plus positionally aligned data rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { header, rows }
    }

    /// Splits extractor output where row 0 is the header and the rest is data.
    pub fn from_rows(mut rows: Vec<Vec<Cell>>) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let header = rows
            .remove(0)
            .iter()
            .map(|cell| cell.as_text().map(|t| t.into_owned()).unwrap_or_default())
            .collect();
        Self { header, rows }
    }

    /// Returns the cell at `column` in data row `row`.
    ///
    /// Rows shorter than the header read as `Empty` in their missing trailing columns.
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }

    pub fn data_row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has neither a header nor data.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }
}
