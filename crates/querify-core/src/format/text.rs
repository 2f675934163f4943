use crate::{
    model::FieldSpec,
    sql::{normalize_smart_quotes, quote_text},
    types::LengthUnit,
};
use tracing::warn;

pub(super) fn format_text(value: &str, field: &FieldSpec) -> String {
    warn_on_length_overrun(value, field);

    quote_text(value)
}

pub(super) fn format_char(value: &str, field: &FieldSpec) -> String {
    warn_on_length_overrun(value, field);

    match field.ty.max_length {
        Some(len) => format!("RPAD({}, {len})", quote_text(value)),
        None => quote_text(value),
    }
}

/// Split into `to_clob('...')` segments of at most `chunk_chars` characters.
///
/// Segments are cut before escaping so a doubled quote never straddles two
/// segments.
pub(super) fn format_clob(value: &str, chunk_chars: usize) -> String {
    let normalized = normalize_smart_quotes(value);
    let chars: Vec<char> = normalized.chars().collect();

    chars
        .chunks(chunk_chars.max(1))
        .map(|segment| {
            let segment: String = segment.iter().collect();
            format!("to_clob({})", quote_text(&segment))
        })
        .collect::<Vec<_>>()
        .join(" || \n")
}

pub(super) fn format_blob(value: &str) -> String {
    format!("UTL_RAW.CAST_TO_RAW({})", quote_text(value))
}

// Length limits are advisory; overruns are logged, never rejected.
fn warn_on_length_overrun(value: &str, field: &FieldSpec) {
    let Some(max_length) = field.ty.max_length else {
        return;
    };

    let actual = match field.ty.length_unit.unwrap_or_default() {
        LengthUnit::Byte => value.len(),
        LengthUnit::Char => value.chars().count(),
    };

    if actual > usize::try_from(max_length).unwrap_or(usize::MAX) {
        warn!(
            field = field.name(),
            declared = %field.ty,
            actual,
            "value exceeds declared length"
        );
    }
}
