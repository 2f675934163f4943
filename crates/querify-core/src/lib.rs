//! Core engine for Querify: schema classification, cell formatting,
//! schema/data validation, primary-key resolution, and Oracle statement
//! generation.
//!
//! Every entry point is a pure function over its inputs. Nothing in this
//! crate holds state between calls.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod compile;
pub mod config;
pub mod error;
pub mod format;
pub mod generate;
pub mod key;
pub mod model;
pub mod obs;
pub mod sql;
pub mod types;
pub mod validate;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Byte budget used by the splitter when the caller does not supply one.
pub const DEFAULT_CHUNK_BUDGET_BYTES: usize = 90 * 1024;

/// Maximum characters carried by a single `to_clob('...')` segment.
pub const DEFAULT_CLOB_CHUNK_CHARS: usize = 1000;

/// Look-back window for the `updated_time` verification count.
pub const DEFAULT_VERIFY_WINDOW_MINUTES: u32 = 5;

/// Oracle rejects IN lists with more than this many expressions (ORA-01795).
pub const MAX_IN_LIST_EXPRESSIONS: usize = 1000;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, formatters, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        compile::{CompileRequest, Compiler, GeneratedStatement},
        config::CompileOptions,
        generate::QueryType,
        key::PrimaryKeySet,
        model::{DataGrid, NullablePk, SchemaRow, TableSchema},
        types::{TypeDescriptor, TypeKind},
        value::Cell,
    };
}
