use crate::aliases::ColumnMap;
use crate::dates::parse_date;
use crate::error::NormalizeError;
use crate::numeric::{parse_decimal, parse_volume};
use chrono::NaiveDate;
use core_types::{CanonicalColumn, Cell, DailyChange, Diagnostics, NormalizedRecord, RawTable};
use rust_decimal::Decimal;

/// Output of `Normalizer::normalize`: records sorted ascending by date, with
/// `prev_close` and the derived metrics filled in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTable {
    pub records: Vec<NormalizedRecord>,
    pub diagnostics: Diagnostics,
}

/// Output of `Normalizer::normalize_changes`, ascending by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSeries {
    pub changes: Vec<DailyChange>,
    pub diagnostics: Diagnostics,
}

/// A stateless converter from extracted tables to typed daily records.
#[derive(Debug, Default)]
pub struct Normalizer {}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes a full OHLC table.
    ///
    /// # Errors
    ///
    /// * `Schema` if any of Date, Open, High, Low, Close or Change% is not resolvable.
    /// * `DateParse` on the first non-blank row whose date no parser accepts.
    /// * `InvalidNumber` on the first Open/High/Low/Close cell that is blank or unparsable.
    pub fn normalize(&self, table: &RawTable) -> Result<NormalizedTable, NormalizeError> {
        if table.is_empty() {
            return Ok(NormalizedTable::default());
        }

        let columns = ColumnMap::from_header(&table.header);
        columns.require(&CanonicalColumn::REQUIRED)?;

        let mut diagnostics = Diagnostics::new();
        let mut rows = Vec::with_capacity(table.data_row_count());

        for (index, raw) in table.rows.iter().enumerate() {
            let row = index + 1;
            if raw.iter().all(Cell::is_blank) {
                tracing::debug!(row, "Skipping blank row.");
                continue;
            }
            let reader = RowReader {
                table,
                columns: &columns,
                index,
                row,
            };

            let date = reader.date()?;
            let open = reader.required_number(CanonicalColumn::Open)?;
            let high = reader.required_number(CanonicalColumn::High)?;
            let low = reader.required_number(CanonicalColumn::Low)?;
            let close = reader.required_number(CanonicalColumn::Close)?;
            let volume = reader.volume(&mut diagnostics);
            let change_pct = reader.change_pct(&mut diagnostics);

            rows.push((
                row,
                NormalizedRecord::new(date, open, high, low, close, volume, change_pct),
            ));
        }

        let mut records = sort_and_dedup(rows, |r| r.date, &mut diagnostics);
        link_prev_closes(&mut records);

        tracing::debug!(
            data_rows = table.data_row_count(),
            records = records.len(),
            warnings = diagnostics.len(),
            "Normalized table."
        );
        Ok(NormalizedTable {
            records,
            diagnostics,
        })
    }

    /// Normalizes only the Date and Change% columns, for the daily summary.
    ///
    /// The other canonical columns may be absent; nothing beyond the date is fatal.
    pub fn normalize_changes(&self, table: &RawTable) -> Result<ChangeSeries, NormalizeError> {
        if table.is_empty() {
            return Ok(ChangeSeries::default());
        }

        let columns = ColumnMap::from_header(&table.header);
        columns.require(&[CanonicalColumn::Date, CanonicalColumn::ChangePct])?;

        let mut diagnostics = Diagnostics::new();
        let mut rows = Vec::with_capacity(table.data_row_count());

        for (index, raw) in table.rows.iter().enumerate() {
            let row = index + 1;
            if raw.iter().all(Cell::is_blank) {
                continue;
            }
            let reader = RowReader {
                table,
                columns: &columns,
                index,
                row,
            };
            let change = DailyChange {
                date: reader.date()?,
                change_pct: reader.change_pct(&mut diagnostics),
            };
            rows.push((row, change));
        }

        let changes = sort_and_dedup(rows, |c| c.date, &mut diagnostics);
        tracing::debug!(changes = changes.len(), "Normalized change series.");
        Ok(ChangeSeries {
            changes,
            diagnostics,
        })
    }
}

static ABSENT: Cell = Cell::Empty;

/// Field access for one data row.
struct RowReader<'a> {
    table: &'a RawTable,
    columns: &'a ColumnMap,
    index: usize,
    row: usize,
}

impl RowReader<'_> {
    fn cell(&self, column: CanonicalColumn) -> &Cell {
        match self.columns.position(column) {
            Some(position) => self.table.cell(self.index, position),
            None => &ABSENT,
        }
    }

    fn text_of(&self, column: CanonicalColumn) -> String {
        self.cell(column)
            .as_text()
            .map(|t| t.into_owned())
            .unwrap_or_default()
    }

    fn date(&self) -> Result<NaiveDate, NormalizeError> {
        parse_date(self.cell(CanonicalColumn::Date)).ok_or_else(|| NormalizeError::DateParse {
            row: self.row,
            value: self.text_of(CanonicalColumn::Date),
        })
    }

    fn required_number(&self, column: CanonicalColumn) -> Result<Decimal, NormalizeError> {
        parse_decimal(self.cell(column)).ok_or_else(|| NormalizeError::InvalidNumber {
            row: self.row,
            column,
            value: self.text_of(column),
        })
    }

    /// Blank or absent volume is zero; an unreadable one is zero with a warning.
    fn volume(&self, diagnostics: &mut Diagnostics) -> Decimal {
        let cell = self.cell(CanonicalColumn::Volume);
        if cell.is_blank() {
            return Decimal::ZERO;
        }
        parse_volume(cell).unwrap_or_else(|| {
            diagnostics.warn(
                Some(self.row),
                Some(CanonicalColumn::Volume),
                format!(
                    "Unparsable volume '{}', using 0",
                    self.text_of(CanonicalColumn::Volume)
                ),
            );
            Decimal::ZERO
        })
    }

    fn change_pct(&self, diagnostics: &mut Diagnostics) -> Decimal {
        parse_decimal(self.cell(CanonicalColumn::ChangePct)).unwrap_or_else(|| {
            diagnostics.warn(
                Some(self.row),
                Some(CanonicalColumn::ChangePct),
                format!(
                    "Unparsable change '{}', using 0",
                    self.text_of(CanonicalColumn::ChangePct)
                ),
            );
            Decimal::ZERO
        })
    }
}

/// Sorts ascending by date (stable) and keeps the first row seen for each date.
fn sort_and_dedup<T>(
    mut rows: Vec<(usize, T)>,
    date_of: impl Fn(&T) -> NaiveDate,
    diagnostics: &mut Diagnostics,
) -> Vec<T> {
    rows.sort_by_key(|(_, item)| date_of(item));

    let mut kept: Vec<T> = Vec::with_capacity(rows.len());
    for (row, item) in rows {
        let date = date_of(&item);
        if kept.last().is_some_and(|last| date_of(last) == date) {
            diagnostics.warn(
                Some(row),
                Some(CanonicalColumn::Date),
                format!("Duplicate date {}, keeping the first row", date),
            );
            continue;
        }
        kept.push(item);
    }
    kept
}

/// Fills `prev_close` from the preceding record; `records` must be ascending.
fn link_prev_closes(records: &mut [NormalizedRecord]) {
    let mut prev_close = None;
    for record in records.iter_mut() {
        record.set_prev_close(prev_close);
        prev_close = Some(record.close);
    }
}
