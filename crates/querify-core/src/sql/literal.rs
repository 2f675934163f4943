use std::borrow::Cow;

/// Double every embedded single quote.
#[must_use]
pub fn escape_quotes(s: &str) -> Cow<'_, str> {
    if s.contains('\'') {
        Cow::Owned(s.replace('\'', "''"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Escape and wrap in single quotes: `ab'c` → `'ab''c'`.
#[must_use]
pub fn quote_text(s: &str) -> String {
    format!("'{}'", escape_quotes(s))
}

/// Inverse of [`quote_text`]. Returns `None` when `literal` is not a
/// single-quoted string.
#[must_use]
pub fn unquote_text(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('\'')?.strip_suffix('\'')?;

    Some(inner.replace("''", "'"))
}

/// Fold typographic quotes pasted from office documents into ASCII.
#[must_use]
pub fn normalize_smart_quotes(s: &str) -> Cow<'_, str> {
    const SMART: [char; 4] = ['\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'];

    if !s.contains(SMART) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' => '\'',
                '\u{201C}' | '\u{201D}' => '"',
                other => other,
            })
            .collect(),
    )
}
