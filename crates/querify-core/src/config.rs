use crate::{DEFAULT_CHUNK_BUDGET_BYTES, DEFAULT_CLOB_CHUNK_CHARS, DEFAULT_VERIFY_WINDOW_MINUTES};
use serde::{Deserialize, Serialize};

///
/// CompileOptions
///
/// Per-request knobs. Every field has a default so callers can deserialize
/// a partial document.
///
/// strict_dates : a date literal matching no known dialect is an error
///                (otherwise it is emitted with the ISO fallback mask)
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompileOptions {
    pub strict_dates: bool,
    pub verify_window_minutes: u32,
    pub clob_chunk_chars: usize,
    pub chunk_budget_bytes: usize,
}

impl CompileOptions {
    #[must_use]
    pub const fn with_strict_dates(mut self, strict: bool) -> Self {
        self.strict_dates = strict;
        self
    }

    #[must_use]
    pub const fn with_verify_window_minutes(mut self, minutes: u32) -> Self {
        self.verify_window_minutes = minutes;
        self
    }

    /// Zero is clamped to one character per segment.
    #[must_use]
    pub const fn with_clob_chunk_chars(mut self, chars: usize) -> Self {
        self.clob_chunk_chars = if chars == 0 { 1 } else { chars };
        self
    }

    #[must_use]
    pub const fn with_chunk_budget_bytes(mut self, bytes: usize) -> Self {
        self.chunk_budget_bytes = bytes;
        self
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            strict_dates: true,
            verify_window_minutes: DEFAULT_VERIFY_WINDOW_MINUTES,
            clob_chunk_chars: DEFAULT_CLOB_CHUNK_CHARS,
            chunk_budget_bytes: DEFAULT_CHUNK_BUDGET_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let options: CompileOptions = serde_json::from_str(r#"{"strictDates":false}"#).unwrap();

        assert!(!options.strict_dates);
        assert_eq!(options.verify_window_minutes, DEFAULT_VERIFY_WINDOW_MINUTES);
        assert_eq!(options.clob_chunk_chars, DEFAULT_CLOB_CHUNK_CHARS);
        assert_eq!(options.chunk_budget_bytes, 90 * 1024);
    }

    #[test]
    fn zero_clob_chunk_is_clamped() {
        let options = CompileOptions::default().with_clob_chunk_chars(0);

        assert_eq!(options.clob_chunk_chars, 1);
    }
}
