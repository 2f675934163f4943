
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt};

///
/// Cell
///
/// One raw grid value, classified once at the ingestion boundary.
/// Downstream code matches on the variant instead of re-sniffing strings.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Null,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Build a text cell.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Returns true for cells the engine treats as SQL `NULL`:
    /// a real null, blank text, or the literal word `NULL` in any case.
    #[must_use]
    pub fn is_null_like(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Number(n) => !n.is_finite(),
            Self::Text(s) => {
                let s = s.trim();
                s.is_empty() || s.eq_ignore_ascii_case("null")
            }
        }
    }

    /// Raw textual form of the cell, trimmed.
    ///
    /// Numbers render through `f64`'s shortest round-trip representation,
    /// so `1.0` becomes `1`.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed(""),
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Text(s) => Cow::Borrowed(s.trim()),
        }
    }

    /// Cell at `index` of `row`; short rows read as null past their end.
    #[must_use]
    pub fn at(row: &[Self], index: usize) -> &Self {
        static NULL: Cell = Cell::Null;

        row.get(index).unwrap_or(&NULL)
    }

    /// Untrimmed text, used where surrounding whitespace is payload
    /// (VARCHAR2 and CLOB bodies).
    #[must_use]
    pub fn as_raw_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            other => other.as_text(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Cell {
    #[expect(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl<T: Into<Self>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
