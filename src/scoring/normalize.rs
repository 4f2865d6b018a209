/// Placeholder for a cell that could not be parsed. Distinct from a real zero.
pub const SENTINEL: i64 = -1;

/// Parse a non-negative integer literal, falling back to `default`.
///
/// Only plain ASCII digits are accepted: no sign, no whitespace, no
/// thousands separators. Values that overflow `i64` count as malformed.
pub fn parse_count(raw: &str, default: i64) -> i64 {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return default;
    }
    raw.parse().unwrap_or(default)
}

/// Parse a non-negative decimal literal (`12`, `0.5`, `.75`), falling back to `default`.
///
/// Signs, exponents and locale separators are all treated as malformed.
pub fn parse_decimal(raw: &str, default: f64) -> f64 {
    let mut digits = 0;
    let mut dots = 0;
    for b in raw.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return default,
        }
    }
    if digits == 0 || dots > 1 {
        return default;
    }
    raw.parse().unwrap_or(default)
}

/// Certified beds minus average daily residents.
///
/// If either cell is malformed the result is the sentinel, which every bed
/// range rule treats as "not enough data".
pub fn available_beds(certified_raw: &str, residents_raw: &str) -> f64 {
    let certified = parse_count(certified_raw, SENTINEL);
    let residents = parse_decimal(residents_raw, SENTINEL as f64);
    if certified < 0 || residents < 0.0 {
        return SENTINEL as f64;
    }
    certified as f64 - residents
}
