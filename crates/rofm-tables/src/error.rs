//! Error types for table rolling.

use thiserror::Error;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Reasons a table cannot be rolled at all.
///
/// These never escape [`crate::TableSource::roll_all`]; a failing table is
/// reported as a roll with no outcome instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The table has no outcome lines to choose from.
    #[error("table has no outcomes")]
    NoOutcomes,

    /// The declared die cannot produce a draw.
    #[error("invalid table die: d{0}")]
    InvalidDie(u64),

    /// The item weights add up to more than a `u64` can hold.
    #[error("table item weights overflow")]
    WeightOverflow,
}
