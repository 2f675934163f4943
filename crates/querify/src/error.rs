use derive_more::Display;
use querify_core::error::{CompileError, ErrorClass};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy, plus the grid
/// position when the error points at a cell.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,

    /// 1-based data row.
    pub row: Option<usize>,

    /// Excel-style column letter.
    pub column: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
            row: None,
            column: None,
        }
    }

    #[must_use]
    pub fn at(mut self, row: Option<usize>, column: Option<&str>) -> Self {
        self.row = row;
        self.column = column.map(str::to_string);
        self
    }

    /// Engine classification, when the error came from the engine.
    #[must_use]
    pub const fn class(&self) -> Option<ErrorClass> {
        match self.kind {
            ErrorKind::Data(class) => Some(class),
            ErrorKind::Request(RequestErrorKind::UnsupportedQueryType) => {
                Some(ErrorClass::UnsupportedQueryType)
            }
            ErrorKind::Request(RequestErrorKind::InvalidDocument) => None,
        }
    }
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Self {
        let origin = match err {
            CompileError::Validation(_) => ErrorOrigin::Validate,
            CompileError::Format { .. } => ErrorOrigin::Format,
            CompileError::UnsupportedQueryType(_) => ErrorOrigin::Request,
        };
        let kind = match err {
            CompileError::UnsupportedQueryType(_) => {
                ErrorKind::Request(RequestErrorKind::UnsupportedQueryType)
            }
            _ => ErrorKind::Data(err.class()),
        };

        Self::new(kind, origin, err.to_string()).at(err.row_index(), err.column_letter())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::new(
            ErrorKind::Request(RequestErrorKind::InvalidDocument),
            ErrorOrigin::Request,
            err.to_string(),
        )
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers and display layers.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Schema and data disagree, or a cell breaks its declared type.
    Data(ErrorClass),

    /// The request itself cannot be compiled.
    Request(RequestErrorKind),
}

///
/// RequestErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RequestErrorKind {
    /// The request document is not valid JSON or has the wrong shape.
    InvalidDocument,

    /// Query type outside insert / merge / merge-classic.
    UnsupportedQueryType,
}

///
/// ErrorOrigin
/// Pipeline stage that raised the error.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Format,
    Request,
    Validate,
}
