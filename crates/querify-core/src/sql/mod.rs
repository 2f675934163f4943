//! Oracle lexical helpers shared by the formatter and the generator.

mod ident;
mod literal;


pub use ident::{is_reserved, quote_ident};
pub use literal::{escape_quotes, normalize_smart_quotes, quote_text, unquote_text};
