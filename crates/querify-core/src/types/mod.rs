//! Data-type classification.
//!
//! Turns the free-form type column of a schema row (`NUMBER(10,2)`,
//! `VARCHAR2(50 BYTE)`, `TIMESTAMP(6) WITH TIME ZONE`, ...) into a
//! [`TypeDescriptor`]. Classification never fails: anything unrecognized
//! becomes [`TypeKind::Unknown`] and is quoted like text downstream.


use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// TypeKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum TypeKind {
    #[display("BLOB")]
    Blob,
    #[display("CHAR")]
    Char,
    #[display("CLOB")]
    Clob,
    #[display("DATE")]
    Date,
    #[display("NUMBER")]
    Number,
    #[display("TIMESTAMP")]
    Timestamp,
    #[display("UNKNOWN")]
    Unknown,
    #[display("VARCHAR")]
    Varchar,
    #[display("VARCHAR2")]
    Varchar2,
}

impl TypeKind {
    /// Map a bare Oracle type keyword onto a kind.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_uppercase().as_str() {
            "NUMBER" => Self::Number,
            "VARCHAR2" | "NVARCHAR2" => Self::Varchar2,
            "VARCHAR" => Self::Varchar,
            "CHAR" | "NCHAR" => Self::Char,
            "DATE" => Self::Date,
            "TIMESTAMP" => Self::Timestamp,
            "CLOB" | "NCLOB" => Self::Clob,
            "BLOB" => Self::Blob,
            _ => Self::Unknown,
        }
    }

    /// Kinds rendered as quoted, escaped text.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(
            self,
            Self::Varchar2 | Self::Varchar | Self::Char | Self::Unknown
        )
    }

    /// Kinds rendered through `TO_TIMESTAMP`.
    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::Timestamp)
    }
}

///
/// LengthUnit
///
/// Length semantics for character types. Oracle defaults to bytes.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum LengthUnit {
    #[default]
    #[display("BYTE")]
    Byte,
    #[display("CHAR")]
    Char,
}

///
/// TypeDescriptor
///
/// Structured form of a declared data type. Derived once per schema row.
///
/// Invariants:
/// - `precision`/`scale` are only set for `Number`
/// - `max_length`/`length_unit` are only set for the character kinds
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct TypeDescriptor {
    pub kind: TypeKind,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub max_length: Option<u32>,
    pub length_unit: Option<LengthUnit>,
}

impl TypeDescriptor {
    #[must_use]
    pub const fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            precision: None,
            scale: None,
            max_length: None,
            length_unit: None,
        }
    }

    #[must_use]
    pub const fn number(precision: Option<u32>, scale: Option<u32>) -> Self {
        Self {
            precision,
            scale,
            ..Self::new(TypeKind::Number)
        }
    }

    #[must_use]
    pub const fn character(kind: TypeKind, max_length: u32, unit: LengthUnit) -> Self {
        Self {
            max_length: Some(max_length),
            length_unit: Some(unit),
            ..Self::new(kind)
        }
    }

    /// `NUMBER(1,0)` is the boolean-flag convention: only 0 or 1.
    #[must_use]
    pub fn is_boolean_flag(&self) -> bool {
        self.kind == TypeKind::Number && self.precision == Some(1) && self.scale == Some(0)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        match (self.kind, self.precision, self.scale, self.max_length) {
            (TypeKind::Number, Some(p), Some(s), _) => write!(f, "({p},{s})"),
            (TypeKind::Number, Some(p), None, _) => write!(f, "({p})"),
            (TypeKind::Number, None, Some(s), _) => write!(f, "(*,{s})"),
            (_, _, _, Some(n)) => {
                let unit = self.length_unit.unwrap_or_default();
                write!(f, "({n} {unit})")
            }
            _ => Ok(()),
        }
    }
}

/// Classify a declared data-type string.
#[must_use]
pub fn classify(data_type: &str) -> TypeDescriptor {
    let data_type = data_type.trim();

    let keyword_end = data_type
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(data_type.len());
    let kind = TypeKind::from_keyword(&data_type[..keyword_end]);

    let args = parenthesized_args(&data_type[keyword_end..]);

    match kind {
        TypeKind::Number => classify_number(args),
        TypeKind::Varchar2 | TypeKind::Varchar | TypeKind::Char => {
            classify_character(kind, args)
        }
        _ => TypeDescriptor::new(kind),
    }
}

// Argument list of the first `( ... )` group, if the remainder opens one.
fn parenthesized_args(rest: &str) -> Option<&str> {
    let rest = rest.trim_start().strip_prefix('(')?;
    let close = rest.find(')')?;

    Some(rest[..close].trim())
}

fn classify_number(args: Option<&str>) -> TypeDescriptor {
    let Some(args) = args else {
        return TypeDescriptor::number(None, None);
    };

    let mut parts = args.split(',').map(str::trim);
    let precision = parts.next().and_then(|p| p.parse::<u32>().ok());
    let scale = parts.next().and_then(|s| s.parse::<u32>().ok());

    match (precision, scale) {
        // NUMBER(p) keeps an implicit scale of zero
        (Some(p), None) => TypeDescriptor::number(Some(p), Some(0)),
        (p, s) => TypeDescriptor::number(p, s),
    }
}

fn classify_character(kind: TypeKind, args: Option<&str>) -> TypeDescriptor {
    let Some(args) = args else {
        return TypeDescriptor::new(kind);
    };

    let mut words = args.split_whitespace();
    let Some(max_length) = words.next().and_then(|n| n.parse::<u32>().ok()) else {
        return TypeDescriptor::new(kind);
    };

    let unit = match words.next() {
        Some(unit) if unit.eq_ignore_ascii_case("CHAR") => LengthUnit::Char,
        _ => LengthUnit::Byte,
    };

    TypeDescriptor::character(kind, max_length, unit)
}
