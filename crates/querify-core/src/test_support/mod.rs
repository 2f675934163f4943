use crate::model::{DataGrid, FieldSpec, NullablePk, SchemaRow, TableSchema};

/// Table name shared by core-only tests.
pub const TEST_TABLE: &str = "t";

/// Build schema rows from `(name, type, marker)` triples.
pub fn schema_rows(fields: &[(&str, &str, &str)]) -> Vec<SchemaRow> {
    fields
        .iter()
        .map(|(name, ty, marker)| SchemaRow::new(*name, *ty, NullablePk::parse(marker)))
        .collect()
}

/// Build a classified schema from `(name, type, marker)` triples.
pub fn table_schema(fields: &[(&str, &str, &str)]) -> TableSchema {
    TableSchema::from_rows(&schema_rows(fields))
}

/// Build a text grid from string rows, header first.
pub fn grid(rows: &[&[&str]]) -> DataGrid {
    DataGrid::from_text_rows(rows.iter().map(|row| row.iter().copied()))
}

/// Build a one-off field spec for formatter tests.
pub fn field(name: &str, ty: &str) -> FieldSpec {
    FieldSpec::new(SchemaRow::new(name, ty, NullablePk::Yes))
}
