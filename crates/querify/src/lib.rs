//! ## Crate layout
//! - `core`: the statement engine (classification, formatting, validation,
//!   key resolution, generation, splitting).
//! - `error`: public error taxonomy for callers and display layers.
//! - `json`: request documents as produced by grid/schema editors.
//!
//! The `prelude` module re-exports the domain vocabulary needed to build a
//! request by hand.

pub use querify_core as core;

pub mod error;
pub mod json;

use crate::core::{
    compile::{CompileRequest, Compiler, GeneratedStatement, SplitOutput},
    config::CompileOptions,
    model::{DataGrid, SchemaRow},
    validate::ValidationResult,
};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::Error;

/// Compile a request with default options.
pub fn compile(request: &CompileRequest) -> Result<GeneratedStatement, Error> {
    compile_with(request, CompileOptions::default())
}

/// Compile a request with explicit options.
pub fn compile_with(
    request: &CompileRequest,
    options: CompileOptions,
) -> Result<GeneratedStatement, Error> {
    Ok(Compiler::new(options).compile(request)?)
}

/// Check schema/data consistency without generating SQL.
#[must_use]
pub fn validate(schema: &[SchemaRow], data: &DataGrid) -> ValidationResult {
    Compiler::default().validate(schema, data)
}

/// Repack a generated script into byte-bounded chunks.
#[must_use]
pub fn split(text: &str, budget_bytes: usize) -> SplitOutput {
    crate::core::compile::split(text, budget_bytes)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::json::{compile_json, parse_request};
}
