use crate::{format::FormatError, types::TypeDescriptor};
use std::borrow::Cow;

/// Trim, drop a leading `+`, and turn a lone decimal comma into a dot.
#[must_use]
pub fn normalize_numeral(raw: &str) -> Cow<'_, str> {
    let s = raw.trim();
    let s = s.strip_prefix('+').unwrap_or(s);

    if !s.contains('.') && s.matches(',').count() == 1 {
        Cow::Owned(s.replacen(',', ".", 1))
    } else {
        Cow::Borrowed(s)
    }
}

/// Shape pre-check shared with the validator: does the value parse as a
/// finite float once normalized?
#[must_use]
pub fn parses_as_finite(raw: &str) -> bool {
    normalize_numeral(raw)
        .parse::<f64>()
        .is_ok_and(f64::is_finite)
}

pub(super) fn format_number(
    raw: &str,
    ty: &TypeDescriptor,
    field: &str,
) -> Result<String, FormatError> {
    let normalized = normalize_numeral(raw);

    if ty.is_boolean_flag() {
        if matches!(normalized.as_ref(), "0" | "1") {
            return Ok(normalized.into_owned());
        }

        return Err(FormatError::BooleanFlag {
            field: field.to_string(),
            value: raw.trim().to_string(),
        });
    }

    let Some(digits) = DigitCounts::parse(&normalized) else {
        return Err(FormatError::NotNumeric {
            field: field.to_string(),
            value: raw.trim().to_string(),
        });
    };

    if !digits.fits(ty) {
        return Err(FormatError::PrecisionOverflow {
            field: field.to_string(),
            value: raw.trim().to_string(),
            declared: ty.to_string(),
        });
    }

    Ok(normalized.into_owned())
}

///
/// DigitCounts
///
/// Significant digits on each side of the decimal point, after any
/// exponent has been applied. Leading integer zeros and trailing
/// fractional zeros do not count.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct DigitCounts {
    pub(super) integer: usize,
    pub(super) fraction: usize,
}

impl DigitCounts {
    pub(super) fn parse(normalized: &str) -> Option<Self> {
        if !parses_as_finite(normalized) {
            return None;
        }

        let body = normalized.strip_prefix('-').unwrap_or(normalized);
        let (mantissa, exponent) = body.split_once(['e', 'E']).unwrap_or((body, ""));

        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part
            .bytes()
            .chain(frac_part.bytes())
            .all(|b| b.is_ascii_digit())
        {
            return None;
        }

        // zeros ahead of the first significant digit shift the point left
        let leading = int_part.bytes().take_while(|&b| b == b'0').count();
        let significant = format!("{}{frac_part}", &int_part[leading..]);
        let significant = significant.trim_start_matches('0');
        let skipped = int_part.len() - leading + frac_part.len() - significant.len();
        let significant = significant.trim_end_matches('0');

        if significant.is_empty() {
            return Some(Self {
                integer: 0,
                fraction: 0,
            });
        }

        let exponent = parse_exponent(exponent)?;
        let to_i64 = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);

        // point measured from the first significant digit
        let point = to_i64(int_part.len() - leading)
            .saturating_sub(to_i64(skipped))
            .saturating_add(exponent);
        let len = to_i64(significant.len());
        let to_usize = |n: i64| usize::try_from(n.max(0)).unwrap_or(usize::MAX);

        Some(Self {
            integer: to_usize(point),
            fraction: to_usize(len.saturating_sub(point)),
        })
    }

    /// Integer digits must fit `precision - scale`; fractional digits must
    /// fit `scale`. Missing limits are unbounded, except that a declared
    /// precision without a scale implies scale zero.
    pub(super) fn fits(self, ty: &TypeDescriptor) -> bool {
        let to_usize = |n: u32| usize::try_from(n).unwrap_or(usize::MAX);

        if let Some(precision) = ty.precision {
            let scale = ty.scale.unwrap_or(0);
            if self.integer > to_usize(precision.saturating_sub(scale)) {
                return false;
            }
        }

        let scale = match (ty.precision, ty.scale) {
            (_, Some(scale)) => Some(scale),
            (Some(_), None) => Some(0),
            (None, None) => None,
        };

        scale.is_none_or(|s| self.fraction <= to_usize(s))
    }
}

// Exponents beyond i64 saturate; the digit counts only need their sign.
fn parse_exponent(exponent: &str) -> Option<i64> {
    if exponent.is_empty() {
        return Some(0);
    }

    let (negative, digits) = match exponent.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, exponent.strip_prefix('+').unwrap_or(exponent)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(digits.parse::<i64>().map_or(
        if negative { i64::MIN } else { i64::MAX },
        |n| if negative { -n } else { n },
    ))
}
