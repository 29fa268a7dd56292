//! # Table Normalizer
//!
//! Maps an extracted table with arbitrary, possibly localized headers onto the
//! canonical schema {Date, Open, High, Low, Close, Volume, Change%} and parses every
//! cell into its semantic type.
//!
//! ## Error policy
//!
//! - A required column that cannot be resolved, a date that no parser accepts, or an
//!   unparsable Open/High/Low/Close value aborts the whole call.
//! - Unparsable Volume or Change% cells are coerced to zero and reported through the
//!   returned `Diagnostics`.

pub mod aliases;
pub mod dates;
pub mod error;
pub mod normalizer;
pub mod numeric;

pub use aliases::{ColumnMap, resolve};
pub use error::NormalizeError;
pub use normalizer::{ChangeSeries, NormalizedTable, Normalizer};
