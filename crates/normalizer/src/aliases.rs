use crate::error::NormalizeError;
use core_types::CanonicalColumn;
use std::collections::BTreeMap;

/// Known header spellings per canonical column, including localized exports.
///
/// Every entry is compared through `header_key`, so case and whitespace do not
/// matter here or in the input.
pub static ALIASES: &[(CanonicalColumn, &[&str])] = &[
    (
        CanonicalColumn::Date,
        &["Date", "Fecha", "Data", "Datum", "Trade Date", "Day"],
    ),
    (
        CanonicalColumn::Open,
        &["Open", "Abertura", "Apertura", "Ouverture", "Opening", "Open Price"],
    ),
    (
        CanonicalColumn::High,
        &[
            "High", "Máxima", "Maxima", "Máximo", "Maximo", "Máx.", "Max", "Alto", "High Price",
        ],
    ),
    (
        CanonicalColumn::Low,
        &[
            "Low", "Mínima", "Minima", "Mínimo", "Minimo", "Mín.", "Min", "Bajo", "Low Price",
        ],
    ),
    (
        CanonicalColumn::Close,
        &[
            "Close", "Price", "Último", "Ultimo", "Cierre", "Fechamento", "Close Price", "Last",
        ],
    ),
    (
        CanonicalColumn::Volume,
        &["Volume", "Vol.", "Vol", "Volumen"],
    ),
    (
        CanonicalColumn::ChangePct,
        &[
            "Change%",
            "Change %",
            "Change",
            "Var %",
            "Var. %",
            "Var",
            "Variation %",
            "% Change",
            "% Var.",
            "Chg %",
            "Variação",
            "Variación %",
        ],
    ),
];

/// Lower-cases a header cell and drops all whitespace, so that "Change %",
/// " change% " and "CHANGE  %" compare equal.
pub fn header_key(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolves one raw header cell to its canonical column.
pub fn resolve(header: &str) -> Option<CanonicalColumn> {
    let key = header_key(header);
    if key.is_empty() {
        return None;
    }
    ALIASES
        .iter()
        .find(|(_, spellings)| spellings.iter().any(|s| header_key(s) == key))
        .map(|(column, _)| *column)
}

/// Positions of the canonical columns within a raw header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    positions: BTreeMap<CanonicalColumn, usize>,
}

impl ColumnMap {
    /// Builds the map for a header row.
    ///
    /// When two raw headers resolve to the same canonical column the later one wins.
    pub fn from_header(header: &[String]) -> Self {
        let mut positions = BTreeMap::new();
        for (index, raw) in header.iter().enumerate() {
            match resolve(raw) {
                Some(column) => {
                    if let Some(previous) = positions.insert(column, index) {
                        tracing::debug!(
                            %column,
                            previous,
                            index,
                            "Header '{}' overrides an earlier column mapping.",
                            raw
                        );
                    }
                }
                None => tracing::debug!("Ignoring unrecognized header '{}'.", raw),
            }
        }
        Self { positions }
    }

    pub fn position(&self, column: CanonicalColumn) -> Option<usize> {
        self.positions.get(&column).copied()
    }

    /// Fails with a schema error naming every column in `required` that is absent.
    pub fn require(&self, required: &[CanonicalColumn]) -> Result<(), NormalizeError> {
        let missing: Vec<CanonicalColumn> = required
            .iter()
            .filter(|column| !self.positions.contains_key(column))
            .copied()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(NormalizeError::Schema { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_alias_resolves_to_its_column() {
        for (column, spellings) in ALIASES {
            for spelling in spellings.iter() {
                assert_eq!(resolve(spelling), Some(*column), "alias {spelling}");
                assert_eq!(resolve(&spelling.to_uppercase()), Some(*column));
                assert_eq!(resolve(&spelling.to_lowercase()), Some(*column));
                assert_eq!(resolve(&format!("  {spelling}\t")), Some(*column));
            }
        }
    }

    #[test]
    fn every_canonical_name_is_its_own_alias() {
        for column in CanonicalColumn::ALL {
            assert_eq!(resolve(column.name()), Some(column));
        }
    }

    #[test]
    fn no_spelling_is_claimed_twice() {
        let mut seen = std::collections::HashMap::new();
        for (column, spellings) in ALIASES {
            for spelling in spellings.iter() {
                if let Some(other) = seen.insert(header_key(spelling), *column) {
                    assert_eq!(other, *column, "alias {spelling} is ambiguous");
                }
            }
        }
    }

    #[test]
    fn unknown_headers_do_not_resolve() {
        assert_eq!(resolve("Ticker"), None);
        assert_eq!(resolve("   "), None);
    }

    #[test]
    fn localized_header_maps_completely() {
        let header: Vec<String> = ["Fecha", "Último", "Abertura", "Máxima", "Mínima", "Vol.", "Var %"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let map = ColumnMap::from_header(&header);
        assert!(map.require(&CanonicalColumn::ALL).is_ok());
        assert_eq!(map.position(CanonicalColumn::Close), Some(1));
        assert_eq!(map.position(CanonicalColumn::ChangePct), Some(6));
    }

    #[test]
    fn later_duplicate_header_wins() {
        let header = vec!["Close".to_string(), "Price".to_string()];
        let map = ColumnMap::from_header(&header);
        assert_eq!(map.position(CanonicalColumn::Close), Some(1));
    }

    #[test]
    fn require_lists_all_missing_columns() {
        let header = vec!["Date".to_string(), "Close".to_string()];
        let err = ColumnMap::from_header(&header)
            .require(&CanonicalColumn::REQUIRED)
            .unwrap_err();
        assert_eq!(
            err,
            NormalizeError::Schema {
                missing: vec![
                    CanonicalColumn::Open,
                    CanonicalColumn::High,
                    CanonicalColumn::Low,
                    CanonicalColumn::ChangePct,
                ]
            }
        );
    }
}
