//! Statement generation.
//!
//! Every cell is formatted before any statement text is assembled, so a
//! single bad cell aborts the request without producing partial SQL.

mod insert;
mod merge;
mod verify;


use crate::{
    config::CompileOptions,
    error::CompileError,
    format::{SqlLiteral, format_value},
    key::PrimaryKeySet,
    model::{DataGrid, FieldSpec, TableSchema},
    sql::quote_ident,
    validate::{ValidationError, column_letter},
    value::Cell,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// First line of every generated script; stops SQL*Plus from treating `&`
/// inside literals as a substitution variable.
pub const SET_DEFINE_OFF: &str = "SET DEFINE OFF;";

///
/// QueryType
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
#[serde(try_from = "String", into = "String")]
pub enum QueryType {
    #[display("insert")]
    Insert,
    #[display("merge")]
    Merge,
    #[display("merge-classic")]
    MergeClassic,
}

impl FromStr for QueryType {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insert" => Ok(Self::Insert),
            "merge" => Ok(Self::Merge),
            "merge-classic" | "merge_classic" => Ok(Self::MergeClassic),
            _ => Err(CompileError::UnsupportedQueryType(s.trim().to_string())),
        }
    }
}

impl TryFrom<String> for QueryType {
    type Error = CompileError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<QueryType> for String {
    fn from(query_type: QueryType) -> Self {
        query_type.to_string()
    }
}

///
/// FormattedGrid
///
/// The data grid after formatting: header-ordered fields and one literal
/// per cell.
///

pub(crate) struct FormattedGrid<'a> {
    pub(crate) columns: Vec<&'a FieldSpec>,
    pub(crate) rows: Vec<Vec<SqlLiteral>>,
}

impl<'a> FormattedGrid<'a> {
    fn build(
        table: &str,
        schema: &'a TableSchema,
        grid: &DataGrid,
        options: &CompileOptions,
    ) -> Result<Self, CompileError> {
        let columns = grid
            .header()
            .iter()
            .map(|name| {
                schema
                    .field(name)
                    .ok_or_else(|| ValidationError::MissingFromSchema {
                        field: name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows = grid
            .data_rows()
            .iter()
            .enumerate()
            .map(|(row_index, row)| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(index, field)| {
                        format_value(Cell::at(row, index), field, table, options).map_err(
                            |source| CompileError::Format {
                                row: row_index + 1,
                                column: column_letter(index),
                                source,
                            },
                        )
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        if rows.is_empty() {
            return Err(ValidationError::EmptyData.into());
        }

        Ok(Self { columns, rows })
    }

    /// Header position of `field`, case-insensitive.
    pub(crate) fn position(&self, field: &str) -> Option<usize> {
        self.columns.iter().position(|f| f.row.is_named(field))
    }
}

/// Generate the full script for one request.
pub fn generate(
    table: &str,
    query_type: QueryType,
    schema: &TableSchema,
    grid: &DataGrid,
    keys: &PrimaryKeySet,
    options: &CompileOptions,
) -> Result<String, CompileError> {
    let table = table.trim();
    let formatted = FormattedGrid::build(table, schema, grid, options)?;

    debug!(
        table,
        %query_type,
        rows = formatted.rows.len(),
        keys = ?keys.as_slice(),
        "generating statements"
    );

    let statements = match query_type {
        QueryType::Insert => insert::statements(table, &formatted),
        QueryType::Merge => vec![merge::compact(table, &formatted, keys)],
        QueryType::MergeClassic => merge::classic(table, &formatted, keys),
    };

    let verification = verify::block(table, schema, &formatted, keys, options);

    let mut sections = vec![SET_DEFINE_OFF.to_string(), statements.join(section_gap(query_type))];
    if !verification.is_empty() {
        sections.push(verification.join("\n"));
    }

    Ok(format!("{}\n", sections.join("\n\n")))
}

// MERGE statements span several lines and are separated by a blank one.
const fn section_gap(query_type: QueryType) -> &'static str {
    match query_type {
        QueryType::Insert => "\n",
        QueryType::Merge | QueryType::MergeClassic => "\n\n",
    }
}

// Comma-separated emitted field names.
fn field_list<'a>(fields: impl IntoIterator<Item = &'a FieldSpec>) -> String {
    fields
        .into_iter()
        .map(|field| quote_ident(field.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn value_list(row: &[SqlLiteral]) -> String {
    row.iter()
        .map(SqlLiteral::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
