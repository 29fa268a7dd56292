use anyhow::{Context, Result, anyhow};
use core_types::{Cell, RawTable};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads a CSV export into a `RawTable`. Row 0 is taken as the header.
pub fn read_table(path: &Path, delimiter: char) -> Result<RawTable> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    read_table_from(file, delimiter)
        .with_context(|| format!("Failed to read CSV from {}", path.display()))
}

/// Every field becomes a text cell; blank fields become `Cell::Empty`.
/// Rows may have differing lengths.
pub fn read_table_from<R: Read>(reader: R, delimiter: char) -> Result<RawTable> {
    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(|b| b.is_ascii())
        .ok_or_else(|| anyhow!("Delimiter must be a single ASCII character, got '{}'", delimiter))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(Cell::from).collect());
    }
    Ok(RawTable::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_ragged_rows() {
        let data = "Date,Price,Open,High,Low,Vol.,Change %\n\
                    15/01/2024,\"1,234.50\",1200,1250,1190,1.2K,0.5%\n\
                    16/01/2024,1240,1234,1245,1230\n";
        let table = read_table_from(data.as_bytes(), ',').unwrap();
        assert_eq!(table.header.len(), 7);
        assert_eq!(table.header[6], "Change %");
        assert_eq!(table.data_row_count(), 2);
        assert_eq!(table.cell(0, 1), &Cell::Text("1,234.50".to_string()));
        assert_eq!(table.cell(1, 6), &Cell::Empty);
    }

    #[test]
    fn semicolon_exports_with_decimal_commas() {
        let data = "Data;Último;Abertura;Máxima;Mínima;Vol.;Var%\n\
                    15.01.2024;10,50;10,20;10,60;10,10;;1,20%\n";
        let table = read_table_from(data.as_bytes(), ';').unwrap();
        assert_eq!(table.header[1], "Último");
        assert_eq!(table.cell(0, 1), &Cell::Text("10,50".to_string()));
        assert_eq!(table.cell(0, 5), &Cell::Empty);
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        assert!(read_table_from("a".as_bytes(), '→').is_err());
    }
}
