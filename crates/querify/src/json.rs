//! JSON ingestion boundary.
//!
//! Accepts the document shape produced by grid editors:
//!
//! ```json
//! {
//!   "tableName": "app.users",
//!   "queryType": "merge",
//!   "schema": [["id", "NUMBER(5)", "PK", "", "1"], {"fieldName": "name", "dataType": "VARCHAR2(10)"}],
//!   "data": [["id", "name"], [1, "ann"]],
//!   "options": {"strictDates": false}
//! }
//! ```
//!
//! Schema rows are positional (`[name, type, nullablePk, default, order,
//! comment]`) or objects. JSON cells become [`Cell`]s once, here.

use crate::error::{Error, ErrorKind, ErrorOrigin, RequestErrorKind};
use querify_core::{
    compile::{CompileRequest, Compiler, GeneratedStatement},
    config::CompileOptions,
    generate::QueryType,
    model::{DataGrid, NullablePk, SchemaRow},
    value::Cell,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

///
/// JsonRequest
///
/// A parsed request document: the engine request and the options it
/// carried (defaults when absent).
///

#[derive(Clone, Debug, PartialEq)]
pub struct JsonRequest {
    pub request: CompileRequest,
    pub options: CompileOptions,
}

///
/// RequestDocument
///

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestDocument {
    table_name: String,
    query_type: String,

    #[serde(default)]
    schema: Vec<SchemaRowDocument>,

    #[serde(default)]
    data: Vec<Vec<Value>>,

    #[serde(default)]
    options: CompileOptions,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SchemaRowDocument {
    Positional(Vec<Value>),
    Object(SchemaRow),
}

/// Parse a request document.
pub fn parse_request(json: &str) -> Result<JsonRequest, Error> {
    let doc: RequestDocument = serde_json::from_str(json).inspect_err(|err| {
        debug!(line = err.line(), column = err.column(), error = %err, "request document rejected");
    })?;
    let query_type: QueryType = doc.query_type.parse()?;

    let schema = doc
        .schema
        .into_iter()
        .enumerate()
        .map(|(index, row)| schema_row(index, row))
        .collect::<Result<Vec<_>, _>>()?;

    let data = DataGrid::new(
        doc.data
            .into_iter()
            .map(|row| row.into_iter().map(cell).collect())
            .collect(),
    );

    Ok(JsonRequest {
        request: CompileRequest::new(doc.table_name, query_type, schema, data),
        options: doc.options,
    })
}

/// Parse and compile a request document with the options it carries.
pub fn compile_json(json: &str) -> Result<GeneratedStatement, Error> {
    let JsonRequest { request, options } = parse_request(json)?;

    Ok(Compiler::new(options).compile(&request)?)
}

/// Map one JSON value onto a grid cell. Booleans follow the `NUMBER(1,0)`
/// flag convention. Integers keep their exact digits as text.
#[must_use]
pub fn cell(value: Value) -> Cell {
    match value {
        Value::Null => Cell::Null,
        Value::Bool(b) => Cell::Number(if b { 1.0 } else { 0.0 }),
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .map_or_else(|| Cell::Text(n.to_string()), Cell::Number),
        Value::Number(n) => Cell::Text(n.to_string()),
        Value::String(s) => Cell::Text(s),
        other @ (Value::Array(_) | Value::Object(_)) => Cell::Text(other.to_string()),
    }
}

fn schema_row(index: usize, row: SchemaRowDocument) -> Result<SchemaRow, Error> {
    let values = match row {
        SchemaRowDocument::Object(row) => return Ok(row),
        SchemaRowDocument::Positional(values) => values,
    };

    let text = |i: usize| values.get(i).map(value_text).unwrap_or_default();
    let optional = |i: usize| Some(text(i)).filter(|s| !s.trim().is_empty());

    let field_name = text(0);
    if field_name.trim().is_empty() {
        return Err(Error::new(
            ErrorKind::Request(RequestErrorKind::InvalidDocument),
            ErrorOrigin::Request,
            format!("schema row {} has no field name", index + 1),
        ));
    }

    let mut row = SchemaRow::new(field_name, text(1), NullablePk::parse(&text(2)));
    row.default = optional(3);
    row.order = optional(4).and_then(|s| s.trim().parse().ok());
    row.comment = optional(5);

    Ok(row)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
