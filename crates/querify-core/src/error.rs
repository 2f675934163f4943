use crate::{format::FormatError, validate::ValidationError};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ErrorClass
///
/// Stable classification of every failure the engine can report.
/// All classes describe bad input; none describe engine faults.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum ErrorClass {
    NullConstraintViolation,
    PrecisionOverflow,
    StructuralMismatch,
    TypeMismatch,
    UnsupportedDialect,
    UnsupportedQueryType,
}

///
/// CompileError
///
/// Pipeline-level failure. A request that returns this produced no SQL.
///

#[derive(Debug, ThisError)]
pub enum CompileError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("row {row}, column {column}: {source}")]
    Format {
        row: usize,
        column: String,
        #[source]
        source: FormatError,
    },

    #[error("unsupported query type '{0}'; expected insert, merge or merge-classic")]
    UnsupportedQueryType(String),
}

impl CompileError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(err) => err.class(),
            Self::Format { source, .. } => source.class(),
            Self::UnsupportedQueryType(_) => ErrorClass::UnsupportedQueryType,
        }
    }

    /// 1-based data row the error points at, when it points at one.
    #[must_use]
    pub const fn row_index(&self) -> Option<usize> {
        match self {
            Self::Validation(err) => err.row_index(),
            Self::Format { row, .. } => Some(*row),
            Self::UnsupportedQueryType(_) => None,
        }
    }

    /// Excel-style column letter the error points at, when it points at one.
    #[must_use]
    pub fn column_letter(&self) -> Option<&str> {
        match self {
            Self::Validation(err) => err.column_letter(),
            Self::Format { column, .. } => Some(column),
            Self::UnsupportedQueryType(_) => None,
        }
    }
}
