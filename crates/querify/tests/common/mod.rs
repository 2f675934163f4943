#![allow(dead_code)]

use querify::prelude::*;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Route engine events to the test writer; filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Schema rows from positional `[name, type, marker]` triples.
pub fn schema(fields: &[(&str, &str, &str)]) -> Vec<SchemaRow> {
    fields
        .iter()
        .map(|(name, ty, marker)| SchemaRow::new(*name, *ty, NullablePk::parse(marker)))
        .collect()
}

/// Text grid, header first.
pub fn data(rows: &[&[&str]]) -> DataGrid {
    DataGrid::from_text_rows(rows.iter().map(|row| row.iter().copied()))
}

pub fn request(
    table: &str,
    query_type: QueryType,
    fields: &[(&str, &str, &str)],
    rows: &[&[&str]],
) -> CompileRequest {
    CompileRequest::new(table, query_type, schema(fields), data(rows))
}
