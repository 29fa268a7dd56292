pub mod cell;
pub mod diagnostics;
pub mod enums;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use cell::{Cell, RawTable};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use enums::{CanonicalColumn, ClosedDayPolicy, DayName, ReportOrder};
pub use structs::{DailyChange, NormalizedRecord};
