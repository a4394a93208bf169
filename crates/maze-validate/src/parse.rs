//! Explicit numeric parsing for raw dimension text.

/// Result of parsing raw dimension text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedNumber {
    /// Base-10 integer, fraction truncated toward zero, saturated to `i64`.
    Parsed(i64),
    NotANumber,
}

/// Parse `[ws][+|-]digits[.digits][ws]`.
///
/// At least one digit is required before the decimal point. Exponents,
/// thousands separators and trailing text are rejected.
pub fn parse_dimension(raw: &str) -> ParsedNumber {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (unsigned, ""),
    };
    if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
        return ParsedNumber::NotANumber;
    }
    let magnitude = whole.bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'))
    });
    ParsedNumber::Parsed(if negative { -magnitude } else { magnitude })
}

fn all_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}
