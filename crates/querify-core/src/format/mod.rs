//! Cell → SQL literal formatting.
//!
//! Precedence is fixed and later rules never override earlier ones:
//! 1. system fields (computed, the incoming value is ignored)
//! 2. null-like cells (bare `NULL`)
//! 3. per-kind formatting driven by the classified type
//!
//! Nullability is not enforced here; the validator owns that rule.

mod date;
mod number;
mod system;
mod text;


use crate::{
    config::CompileOptions, error::ErrorClass, model::FieldSpec, types::TypeKind, value::Cell,
};
use derive_more::Display;
use thiserror::Error as ThisError;

// re-exports
pub use date::{DialectMatch, is_sysdate, recognize};
pub use number::{normalize_numeral, parses_as_finite};
pub use system::{SystemField, is_null_exempt, is_write_once};

///
/// FormatError
///
/// Per-cell formatting failure. Any one of these aborts the whole request.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FormatError {
    #[error("field '{field}' is a NUMBER(1,0) flag and only accepts 0 or 1, got '{value}'")]
    BooleanFlag { field: String, value: String },

    #[error("value '{value}' for field '{field}' exceeds {declared}")]
    PrecisionOverflow {
        field: String,
        value: String,
        declared: String,
    },

    #[error("value '{value}' for field '{field}' is not a number")]
    NotNumeric { field: String, value: String },

    #[error("value '{value}' for field '{field}' matches the {dialect} format but is not a valid date")]
    InvalidDate {
        field: String,
        value: String,
        dialect: &'static str,
    },

    #[error("value '{value}' for field '{field}' is not in a recognized date format")]
    UnsupportedDialect { field: String, value: String },
}

impl FormatError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::BooleanFlag { .. } | Self::PrecisionOverflow { .. } => {
                ErrorClass::PrecisionOverflow
            }
            Self::NotNumeric { .. } => ErrorClass::TypeMismatch,
            Self::InvalidDate { .. } | Self::UnsupportedDialect { .. } => {
                ErrorClass::UnsupportedDialect
            }
        }
    }
}

///
/// SqlLiteral
///
/// A rendered SQL value expression, ready to splice into a statement.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SqlLiteral(String);

impl SqlLiteral {
    pub const NULL: &'static str = "NULL";

    pub(crate) const fn new(sql: String) -> Self {
        Self(sql)
    }

    #[must_use]
    pub fn null() -> Self {
        Self(Self::NULL.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == Self::NULL
    }
}

/// Format one cell for `field` of `table`.
pub fn format_value(
    cell: &Cell,
    field: &FieldSpec,
    table: &str,
    options: &CompileOptions,
) -> Result<SqlLiteral, FormatError> {
    let name = field.name();

    if let Some(system) = SystemField::detect(name, field.ty.kind, table) {
        return Ok(SqlLiteral::new(system.literal(name, table)));
    }

    if cell.is_null_like() {
        return Ok(SqlLiteral::null());
    }

    let sql = match field.ty.kind {
        TypeKind::Number => number::format_number(&cell.as_text(), &field.ty, name)?,
        TypeKind::Varchar2 | TypeKind::Varchar | TypeKind::Unknown => {
            text::format_text(&cell.as_raw_text(), field)
        }
        TypeKind::Char => text::format_char(&cell.as_raw_text(), field),
        TypeKind::Date | TypeKind::Timestamp => {
            date::format_date(&cell.as_text(), name, options.strict_dates)?
        }
        TypeKind::Clob => text::format_clob(&cell.as_raw_text(), options.clob_chunk_chars),
        TypeKind::Blob => text::format_blob(&cell.as_text()),
    };

    Ok(SqlLiteral::new(sql))
}
