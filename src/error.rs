//! Error types for redshift transforms and table accumulation.
//!
//! Every public operation returns [`Result`], and every failure is detected
//! during validation before a caller-supplied destination is written.

use thiserror::Error;

use crate::model::Shape;

/// Errors raised by [`crate::redshift`] and [`crate::combine`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An operand was not a record table.
    #[error("Invalid {argument} type: expected a record table, found {found}")]
    InvalidArgumentType {
        argument: &'static str,
        found: &'static str,
    },

    /// A redshift value was negative (or NaN).
    #[error("Found invalid {which} < 0: {value}")]
    InvalidRedshift { which: &'static str, value: f64 },

    /// A malformed transform rule, column selection, or weight spec.
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// A rule refers to a column that the named table does not carry.
    #[error("No such {table} column named '{column}'")]
    MissingColumn {
        column: String,
        table: &'static str,
    },

    /// A join column is not present in both input tables.
    #[error("Column '{0}' is not present in both input tables")]
    UnknownColumn(String),

    /// A rule supplies an explicit array while a source table is also given.
    #[error("Cannot specify both data_in and an explicit array for '{0}'")]
    ColumnSourceConflict(String),

    /// A rule has no explicit array and there is no source table.
    #[error("Missing explicit array for '{0}' (with no data_in)")]
    MissingSource(String),

    /// Two shapes that must agree do not.
    #[error("Incompatible shape for {context}: {found}, expected {expected}")]
    ShapeMismatch {
        context: String,
        expected: Shape,
        found: Shape,
    },

    /// A mask was set on a table that carries no element masks.
    #[error("Cannot mask column '{0}' of a plain table")]
    MaskUnsupported(String),

    /// The destination cannot represent masks that the inputs require.
    #[error("{0} discards input masks")]
    MaskDowngrade(&'static str),

    /// Join column values disagree where both sides are valid.
    #[error("Join column '{column}' does not match at element {index}: {left} != {right}")]
    UnmatchedJoin {
        column: String,
        index: usize,
        left: f64,
        right: f64,
    },

    /// The resolved set of join and add columns is empty.
    #[error("No join or add columns to accumulate")]
    NoOutputColumns,
}

impl Error {
    pub(crate) fn shape_mismatch(
        context: impl Into<String>,
        expected: &Shape,
        found: &Shape,
    ) -> Self {
        Error::ShapeMismatch {
            context: context.into(),
            expected: expected.clone(),
            found: found.clone(),
        }
    }
}

/// Result type for every operation in this crate.
pub type Result<T> = std::result::Result<T, Error>;
