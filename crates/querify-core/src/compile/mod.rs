//! Request orchestration: validate, resolve keys, generate.
//!
//! A request either produces the complete script or an error; validation
//! failures are returned untouched and no SQL is built for them.

mod split;

#[cfg(test)]
mod tests;

use crate::{
    config::CompileOptions,
    error::CompileError,
    generate::{QueryType, generate},
    key::{PrimaryKeySet, resolve},
    model::{DataGrid, SchemaRow, TableSchema},
    obs::CompileReport,
    validate::{ValidationResult, validate_schema},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

// re-exports
pub use split::{SplitOutput, split, split_statements};

///
/// CompileRequest
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileRequest {
    pub table_name: String,
    pub query_type: QueryType,
    pub schema: Vec<SchemaRow>,
    pub data: DataGrid,
}

impl CompileRequest {
    #[must_use]
    pub fn new(
        table_name: impl Into<String>,
        query_type: QueryType,
        schema: Vec<SchemaRow>,
        data: DataGrid,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            query_type,
            schema,
            data,
        }
    }
}

///
/// GeneratedStatement
///
/// The generated script plus what the caller needs to present it. Owned by
/// the caller; nothing is retained by the engine.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedStatement {
    pub query: String,
    pub full_table_name: String,
    pub primary_keys: PrimaryKeySet,
    pub table_schema: TableSchema,
    pub size_in_bytes: usize,
    pub report: CompileReport,
}

///
/// Compiler
///

#[derive(Clone, Debug, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    #[must_use]
    pub const fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Validate without generating.
    #[must_use]
    pub fn validate(&self, schema: &[SchemaRow], data: &DataGrid) -> ValidationResult {
        validate_schema(&TableSchema::from_rows(schema), data, &self.options)
    }

    pub fn compile(&self, request: &CompileRequest) -> Result<GeneratedStatement, CompileError> {
        let table = request.table_name.trim();
        let schema = TableSchema::from_rows(&request.schema);

        debug!(
            table,
            query_type = %request.query_type,
            fields = schema.len(),
            data_rows = request.data.data_rows().len(),
            "compile requested"
        );

        validate_schema(&schema, &request.data, &self.options).into_result()?;

        let primary_keys = resolve(&request.schema, table);
        let query = generate(
            table,
            request.query_type,
            &schema,
            &request.data,
            &primary_keys,
            &self.options,
        )?;

        let split = self.split(&query);
        let report = CompileReport {
            table: table.to_string(),
            query_type: request.query_type,
            fields: schema.len(),
            data_rows: request.data.data_rows().len(),
            statements: split.statements,
            bytes: query.len(),
            chunks: split.chunks.len(),
            oversized: split.oversized,
        };
        report.record();

        Ok(GeneratedStatement {
            size_in_bytes: query.len(),
            query,
            full_table_name: table.to_string(),
            primary_keys,
            table_schema: schema,
            report,
        })
    }

    /// Split with the configured chunk budget.
    #[must_use]
    pub fn split(&self, text: &str) -> SplitOutput {
        split(text, self.options.chunk_budget_bytes)
    }
}

/// Compile with default options.
pub fn compile(request: &CompileRequest) -> Result<GeneratedStatement, CompileError> {
    Compiler::default().compile(request)
}
