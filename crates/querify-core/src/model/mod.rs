//! Input model: declared schema rows, the raw data grid, and the classified
//! table schema derived from them.

#[cfg(test)]
mod tests;

use crate::{
    types::{TypeDescriptor, classify},
    value::Cell,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// NullablePk
///
/// The combined nullability / primary-key marker of a schema row.
/// Parsing is forgiving: anything that is not a recognized `PK` or
/// not-null marker is treated as nullable.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "String", into = "String")]
pub enum NullablePk {
    #[default]
    Yes,
    No,
    #[display("PK")]
    Pk,
}

impl NullablePk {
    #[must_use]
    pub fn parse(marker: &str) -> Self {
        let marker = marker.trim();

        if marker.eq_ignore_ascii_case("pk") {
            Self::Pk
        } else if ["no", "n", "false", "not null"]
            .iter()
            .any(|m| marker.eq_ignore_ascii_case(m))
        {
            Self::No
        } else {
            Self::Yes
        }
    }

    #[must_use]
    pub const fn is_pk(self) -> bool {
        matches!(self, Self::Pk)
    }
}

impl From<String> for NullablePk {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<NullablePk> for String {
    fn from(marker: NullablePk) -> Self {
        marker.to_string()
    }
}

///
/// SchemaRow
///
/// One declared field as authored in the schema editor.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaRow {
    pub field_name: String,
    pub data_type: String,

    #[serde(default)]
    pub nullable_pk: NullablePk,

    #[serde(default)]
    pub default: Option<String>,

    #[serde(default)]
    pub order: Option<u32>,

    #[serde(default)]
    pub comment: Option<String>,
}

impl SchemaRow {
    #[must_use]
    pub fn new(
        field_name: impl Into<String>,
        data_type: impl Into<String>,
        nullable_pk: NullablePk,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            data_type: data_type.into(),
            nullable_pk,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub const fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Field name without surrounding whitespace.
    #[must_use]
    pub fn name(&self) -> &str {
        self.field_name.trim()
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name().eq_ignore_ascii_case(name.trim())
    }
}

///
/// DataGrid
///
/// Row 0 is the header (field names); rows 1..N are data rows.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DataGrid {
    rows: Vec<Vec<Cell>>,
}

impl DataGrid {
    #[must_use]
    pub const fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Build a grid from plain text rows; blank strings stay text and are
    /// treated as null-like downstream.
    #[must_use]
    pub fn from_text_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(|s| Cell::Text(s.into())).collect())
                .collect(),
        )
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header field names, trimmed, in column order.
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.iter().map(|c| c.as_text().into_owned()).collect())
            .unwrap_or_default()
    }

    /// Data rows, excluding the header.
    #[must_use]
    pub fn data_rows(&self) -> &[Vec<Cell>] {
        self.rows.get(1..).unwrap_or_default()
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}

///
/// FieldSpec
///
/// A schema row paired with its classified type.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldSpec {
    pub row: SchemaRow,
    pub ty: TypeDescriptor,
}

impl FieldSpec {
    #[must_use]
    pub fn new(row: SchemaRow) -> Self {
        let ty = classify(&row.data_type);

        Self { row, ty }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.row.name()
    }
}

///
/// TableSchema
///
/// Classified schema, in declaration order. Built fresh per request.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableSchema {
    fields: Vec<FieldSpec>,
}

impl TableSchema {
    #[must_use]
    pub fn from_rows(rows: &[SchemaRow]) -> Self {
        Self {
            fields: rows.iter().cloned().map(FieldSpec::new).collect(),
        }
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Case-insensitive lookup by field name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.row.is_named(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}
