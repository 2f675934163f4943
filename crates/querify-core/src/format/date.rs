//! Date dialects.
//!
//! Each dialect pairs a shape pattern with a strict parser and the Oracle
//! format mask that reads the literal back. Dialects are tried in order and
//! the first pattern match commits: if that dialect's parser then rejects
//! the value, no later dialect is consulted.

use crate::{format::FormatError, sql::quote_text};
use regex::Regex;
use std::sync::LazyLock;
use time::{Date, PrimitiveDateTime, macros::format_description};
use tracing::trace;

/// Mask used for unmatched literals when strict dates are off.
const FALLBACK_MASK: &str = "YYYY-MM-DD HH24:MI:SS";

/// Placeholder replaced by `.FF<n>` (or nothing) inside a mask.
const FRACTION_SLOT: &str = "{ff}";

///
/// Dialect
///

struct Dialect {
    name: &'static str,
    pattern: &'static str,
    mask: &'static str,
    parse: fn(&str) -> bool,
}

#[rustfmt::skip]
const DIALECTS: &[Dialect] = &[
    Dialect {
        name: "YYYY-MM-DD",
        pattern: r"^\d{4}-\d{2}-\d{2}$",
        mask: "YYYY-MM-DD",
        parse: |s| Date::parse(s, format_description!("[year]-[month]-[day]")).is_ok(),
    },
    Dialect {
        name: "YYYY-MM-DD HH:mm:ss",
        pattern: r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}(?:\.(?P<frac>\d{1,9}))?$",
        mask: "YYYY-MM-DD HH24:MI:SS{ff}",
        parse: |s| {
            PrimitiveDateTime::parse(s, format_description!("[year]-[month]-[day] [hour]:[minute]:[second]")).is_ok()
                || PrimitiveDateTime::parse(s, format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]")).is_ok()
        },
    },
    Dialect {
        name: "YYYY-MM-DDTHH:mm:ss",
        pattern: r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.(?P<frac>\d{1,9}))?$",
        mask: r#"YYYY-MM-DD"T"HH24:MI:SS{ff}"#,
        parse: |s| {
            PrimitiveDateTime::parse(s, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]")).is_ok()
                || PrimitiveDateTime::parse(s, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]")).is_ok()
        },
    },
    Dialect {
        name: "YYYY-MM-DD HH:mm",
        pattern: r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$",
        mask: "YYYY-MM-DD HH24:MI",
        parse: |s| PrimitiveDateTime::parse(s, format_description!("[year]-[month]-[day] [hour]:[minute]")).is_ok(),
    },
    Dialect {
        name: "YYYY-MM-DD hh:mm:ss A",
        pattern: r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} (?i:[ap]m)$",
        mask: "YYYY-MM-DD HH:MI:SS AM",
        parse: |s| {
            PrimitiveDateTime::parse(
                s,
                format_description!("[year]-[month]-[day] [hour repr:12]:[minute]:[second] [period case_sensitive:false]"),
            )
            .is_ok()
        },
    },
    Dialect {
        name: "DD-MM-YYYY",
        pattern: r"^\d{2}-\d{2}-\d{4}$",
        mask: "DD-MM-YYYY",
        parse: |s| Date::parse(s, format_description!("[day]-[month]-[year]")).is_ok(),
    },
    Dialect {
        name: "DD-MM-YYYY HH:mm:ss",
        pattern: r"^\d{2}-\d{2}-\d{4} \d{2}:\d{2}:\d{2}(?:\.(?P<frac>\d{1,9}))?$",
        mask: "DD-MM-YYYY HH24:MI:SS{ff}",
        parse: |s| {
            PrimitiveDateTime::parse(s, format_description!("[day]-[month]-[year] [hour]:[minute]:[second]")).is_ok()
                || PrimitiveDateTime::parse(s, format_description!("[day]-[month]-[year] [hour]:[minute]:[second].[subsecond]")).is_ok()
        },
    },
    Dialect {
        name: "DD/MM/YYYY",
        pattern: r"^\d{2}/\d{2}/\d{4}$",
        mask: "DD/MM/YYYY",
        parse: |s| Date::parse(s, format_description!("[day]/[month]/[year]")).is_ok(),
    },
    Dialect {
        name: "DD/MM/YYYY HH:mm:ss",
        pattern: r"^\d{2}/\d{2}/\d{4} \d{2}:\d{2}:\d{2}$",
        mask: "DD/MM/YYYY HH24:MI:SS",
        parse: |s| PrimitiveDateTime::parse(s, format_description!("[day]/[month]/[year] [hour]:[minute]:[second]")).is_ok(),
    },
    Dialect {
        name: "MM/DD/YYYY hh:mm:ss A",
        pattern: r"^\d{2}/\d{2}/\d{4} \d{2}:\d{2}:\d{2} (?i:[ap]m)$",
        mask: "MM/DD/YYYY HH:MI:SS AM",
        parse: |s| {
            PrimitiveDateTime::parse(
                s,
                format_description!("[month]/[day]/[year] [hour repr:12]:[minute]:[second] [period case_sensitive:false]"),
            )
            .is_ok()
        },
    },
    Dialect {
        name: "DD-MON-YYYY",
        pattern: r"^\d{2}-[A-Za-z]{3}-\d{4}$",
        mask: "DD-MON-YYYY",
        parse: |s| Date::parse(s, format_description!("[day]-[month repr:short case_sensitive:false]-[year]")).is_ok(),
    },
    Dialect {
        name: "DD-MON-YY hh.mm.ss A",
        pattern: r"^\d{2}-[A-Za-z]{3}-\d{2} \d{2}\.\d{2}\.\d{2}(?:\.(?P<frac>\d{1,9}))? (?i:[ap]m)$",
        mask: "DD-MON-RR HH.MI.SS{ff} AM",
        parse: parse_oracle_display,
    },
];

static COMPILED: LazyLock<Vec<(Regex, &'static Dialect)>> = LazyLock::new(|| {
    DIALECTS
        .iter()
        .map(|d| (Regex::new(d.pattern).expect("dialect pattern must compile"), d))
        .collect()
});

// Oracle's default NLS display (`05-JAN-24 10.20.30.123456 AM`) carries a
// two-digit year; the parser only needs a calendar check, so the century
// is pinned before parsing.
fn parse_oracle_display(s: &str) -> bool {
    let (Some(date), Some(rest)) = (s.get(..7), s.get(7..)) else {
        return false;
    };
    let expanded = format!("{date}20{rest}");

    PrimitiveDateTime::parse(
        &expanded,
        format_description!(
            "[day]-[month repr:short case_sensitive:false]-[year] [hour repr:12].[minute].[second] [period case_sensitive:false]"
        ),
    )
    .is_ok()
        || PrimitiveDateTime::parse(
            &expanded,
            format_description!(
                "[day]-[month repr:short case_sensitive:false]-[year] [hour repr:12].[minute].[second].[subsecond] [period case_sensitive:false]"
            ),
        )
        .is_ok()
}

///
/// DialectMatch
///
/// Outcome of scanning the dialect table for one literal.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DialectMatch {
    /// A dialect matched and parsed; `mask` is the Oracle format mask.
    Parsed { dialect: &'static str, mask: String },

    /// A dialect matched the shape but the value is not a real date/time.
    Rejected { dialect: &'static str },

    /// No dialect pattern matched.
    NoMatch,
}

/// `SYSDATE` in any case.
#[must_use]
pub fn is_sysdate(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("SYSDATE")
}

/// Scan the dialect table; the first pattern match decides the outcome.
#[must_use]
pub fn recognize(value: &str) -> DialectMatch {
    let value = value.trim();

    let Some((captures, dialect)) = COMPILED
        .iter()
        .find_map(|(re, d)| re.captures(value).map(|c| (c, *d)))
    else {
        return DialectMatch::NoMatch;
    };

    if !(dialect.parse)(value) {
        return DialectMatch::Rejected {
            dialect: dialect.name,
        };
    }

    let fraction = captures
        .name("frac")
        .map(|m| format!(".FF{}", m.as_str().len()))
        .unwrap_or_default();

    DialectMatch::Parsed {
        dialect: dialect.name,
        mask: dialect.mask.replace(FRACTION_SLOT, &fraction),
    }
}

pub(super) fn format_date(value: &str, field: &str, strict: bool) -> Result<String, FormatError> {
    if is_sysdate(value) {
        return Ok("SYSDATE".to_string());
    }

    let mask = match recognize(value) {
        DialectMatch::Parsed { dialect, mask } => {
            trace!(field, value, dialect, "date dialect matched");
            mask
        }
        DialectMatch::Rejected { dialect } => {
            return Err(FormatError::InvalidDate {
                field: field.to_string(),
                value: value.to_string(),
                dialect,
            });
        }
        DialectMatch::NoMatch if strict => {
            return Err(FormatError::UnsupportedDialect {
                field: field.to_string(),
                value: value.to_string(),
            });
        }
        DialectMatch::NoMatch => {
            trace!(field, value, "no date dialect matched, using fallback mask");
            FALLBACK_MASK.to_string()
        }
    };

    Ok(format!("TO_TIMESTAMP({}, '{mask}')", quote_text(value)))
}
