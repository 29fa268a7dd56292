use crate::enums::CanonicalColumn;
use serde::Serialize;

/// A soft-recoverable problem found while processing one call's input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 1-based data row number (the header is row 0), when the problem is row-specific.
    pub row: Option<usize>,
    pub column: Option<CanonicalColumn>,
    pub message: String,
}

/// Collects the warnings of a single engine invocation.
///
/// Each recorded warning is also emitted as a `tracing` event so that it shows up
/// in the process log, but the collector itself is owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(
        &mut self,
        row: Option<usize>,
        column: Option<CanonicalColumn>,
        message: impl Into<String>,
    ) {
        let message = message.into();
        tracing::warn!(row = ?row, column = ?column, "{}", message);
        self.warnings.push(Diagnostic {
            row,
            column,
            message,
        });
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Appends the warnings of another collector, keeping their order.
    pub fn merge(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }

    /// Warnings recorded against `column`.
    pub fn for_column(&self, column: CanonicalColumn) -> impl Iterator<Item = &Diagnostic> {
        self.warnings
            .iter()
            .filter(move |d| d.column == Some(column))
    }
}
