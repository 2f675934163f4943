//! Schema/data consistency checks.
//!
//! Validation is cheap and runs before any SQL text exists. It re-checks
//! only the *shape* of numeric and timestamp cells; precision, scale and
//! calendar limits belong to the formatter.

mod column;


use crate::{
    config::CompileOptions,
    error::ErrorClass,
    format::{DialectMatch, is_null_exempt, is_sysdate, parses_as_finite, recognize},
    model::{DataGrid, FieldSpec, NullablePk, SchemaRow, TableSchema},
    types::TypeKind,
    value::Cell,
};
use std::collections::HashSet;
use thiserror::Error as ThisError;

// re-exports
pub use column::column_letter;

///
/// ValidationError
///
/// The first inconsistency found between a schema and its data grid.
/// Row indexes are 1-based data rows (the header is row 0).
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValidationError {
    #[error("data grid has no header or no data rows")]
    EmptyData,

    #[error("schema declares {schema} fields but the data header has {header}")]
    FieldCountMismatch { schema: usize, header: usize },

    #[error("schema declares field '{field}' more than once")]
    DuplicateField { field: String },

    #[error("schema field '{field}' is missing from the data header")]
    MissingFromData { field: String },

    #[error("data header field '{field}' is not declared in the schema")]
    MissingFromSchema { field: String },

    #[error("row {row}, column {column}: field '{field}' is not nullable but has no value")]
    NullConstraint {
        row: usize,
        column: String,
        field: String,
    },

    #[error("row {row}, column {column}: field '{field}' expects {expected}, got '{actual}'")]
    TypeMismatch {
        row: usize,
        column: String,
        field: String,
        expected: String,
        actual: String,
    },
}

impl ValidationError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::EmptyData
            | Self::FieldCountMismatch { .. }
            | Self::DuplicateField { .. }
            | Self::MissingFromData { .. }
            | Self::MissingFromSchema { .. } => ErrorClass::StructuralMismatch,
            Self::NullConstraint { .. } => ErrorClass::NullConstraintViolation,
            Self::TypeMismatch { .. } => ErrorClass::TypeMismatch,
        }
    }

    #[must_use]
    pub const fn row_index(&self) -> Option<usize> {
        match self {
            Self::NullConstraint { row, .. } | Self::TypeMismatch { row, .. } => Some(*row),
            _ => None,
        }
    }

    #[must_use]
    pub fn column_letter(&self) -> Option<&str> {
        match self {
            Self::NullConstraint { column, .. } | Self::TypeMismatch { column, .. } => {
                Some(column)
            }
            _ => None,
        }
    }
}

///
/// ValidationResult
///
/// Terminal outcome of one validator call. Exactly one variant is
/// returned; there is no partial report.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    #[must_use]
    pub const fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(err) => Some(err),
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    #[must_use]
    pub const fn row_index(&self) -> Option<usize> {
        match self {
            Self::Valid => None,
            Self::Invalid(err) => err.row_index(),
        }
    }

    #[must_use]
    pub fn column_letter(&self) -> Option<&str> {
        self.error().and_then(ValidationError::column_letter)
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(err) => Err(err),
        }
    }
}

impl From<Result<(), ValidationError>> for ValidationResult {
    fn from(result: Result<(), ValidationError>) -> Self {
        result.map_or_else(Self::Invalid, |()| Self::Valid)
    }
}

/// Validate raw schema rows against a data grid.
#[must_use]
pub fn validate(
    schema_rows: &[SchemaRow],
    grid: &DataGrid,
    options: &CompileOptions,
) -> ValidationResult {
    validate_schema(&TableSchema::from_rows(schema_rows), grid, options)
}

/// Validate an already classified schema against a data grid.
#[must_use]
pub fn validate_schema(
    schema: &TableSchema,
    grid: &DataGrid,
    options: &CompileOptions,
) -> ValidationResult {
    run_checks(schema, grid, options).into()
}

fn run_checks(
    schema: &TableSchema,
    grid: &DataGrid,
    options: &CompileOptions,
) -> Result<(), ValidationError> {
    let header = grid.header();
    if header.is_empty() || grid.data_rows().is_empty() {
        return Err(ValidationError::EmptyData);
    }

    check_structure(schema, &header)?;

    // schema field -> header position
    let columns: Vec<(&FieldSpec, usize)> = schema
        .fields()
        .iter()
        .filter_map(|field| {
            header
                .iter()
                .position(|h| field.row.is_named(h))
                .map(|index| (field, index))
        })
        .collect();

    check_nulls(&columns, grid)?;
    check_shapes(&columns, grid, options)
}

fn check_structure(schema: &TableSchema, header: &[String]) -> Result<(), ValidationError> {
    if schema.len() != header.len() {
        return Err(ValidationError::FieldCountMismatch {
            schema: schema.len(),
            header: header.len(),
        });
    }

    if let Some(field) = schema
        .fields()
        .iter()
        .find(|f| !header.iter().any(|h| f.row.is_named(h)))
    {
        return Err(ValidationError::MissingFromData {
            field: field.name().to_string(),
        });
    }

    if let Some(name) = header.iter().find(|h| !schema.contains(h)) {
        return Err(ValidationError::MissingFromSchema {
            field: name.clone(),
        });
    }

    let mut seen = HashSet::new();
    for field in schema.fields() {
        if !seen.insert(field.name().to_ascii_lowercase()) {
            return Err(ValidationError::DuplicateField {
                field: field.name().to_string(),
            });
        }
    }

    Ok(())
}

fn check_nulls(columns: &[(&FieldSpec, usize)], grid: &DataGrid) -> Result<(), ValidationError> {
    for (row_index, row) in grid.data_rows().iter().enumerate() {
        for &(field, index) in columns {
            if field.row.nullable_pk != NullablePk::No || is_null_exempt(field.name()) {
                continue;
            }

            if Cell::at(row, index).is_null_like() {
                return Err(ValidationError::NullConstraint {
                    row: row_index + 1,
                    column: column_letter(index),
                    field: field.name().to_string(),
                });
            }
        }
    }

    Ok(())
}

fn check_shapes(
    columns: &[(&FieldSpec, usize)],
    grid: &DataGrid,
    options: &CompileOptions,
) -> Result<(), ValidationError> {
    for (row_index, row) in grid.data_rows().iter().enumerate() {
        for &(field, index) in columns {
            // computed fields never read their cell
            if is_null_exempt(field.name()) {
                continue;
            }

            let cell = Cell::at(row, index);
            if cell.is_null_like() || shape_ok(cell, field, options) {
                continue;
            }

            return Err(ValidationError::TypeMismatch {
                row: row_index + 1,
                column: column_letter(index),
                field: field.name().to_string(),
                expected: field.ty.to_string(),
                actual: cell.as_text().into_owned(),
            });
        }
    }

    Ok(())
}

fn shape_ok(cell: &Cell, field: &FieldSpec, options: &CompileOptions) -> bool {
    match field.ty.kind {
        TypeKind::Number => parses_as_finite(&cell.as_text()),
        TypeKind::Timestamp => {
            let value = cell.as_text();

            is_sysdate(&value)
                || match recognize(&value) {
                    DialectMatch::Parsed { .. } => true,
                    DialectMatch::Rejected { .. } => false,
                    DialectMatch::NoMatch => !options.strict_dates,
                }
        }
        _ => true,
    }
}
