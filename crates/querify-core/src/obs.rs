//! Per-call compile summary.
//!
//! Reports are built fresh for every call and handed back to the caller;
//! nothing is accumulated globally.

use crate::generate::QueryType;
use serde::{Deserialize, Serialize};
use tracing::debug;

///
/// CompileReport
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileReport {
    pub table: String,
    pub query_type: QueryType,

    // input
    pub fields: usize,
    pub data_rows: usize,

    // output
    pub statements: usize,
    pub bytes: usize,
    pub chunks: usize,
    pub oversized: usize,
}

impl CompileReport {
    /// Emit the report as a single structured `debug` event.
    pub fn record(&self) {
        debug!(
            table = %self.table,
            query_type = %self.query_type,
            fields = self.fields,
            data_rows = self.data_rows,
            statements = self.statements,
            bytes = self.bytes,
            chunks = self.chunks,
            oversized = self.oversized,
            "compile finished"
        );
    }
}
