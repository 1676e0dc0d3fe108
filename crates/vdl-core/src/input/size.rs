//! Size hints: validation and conversion to a bit count.

/// Returns true if `token` has the strict size-hint shape `<digits>[.<digits>]<K|M|G>`
/// (unit case-insensitive). This is what the token parser accepts.
pub fn is_size_hint(token: &str) -> bool {
    let Some(unit) = token.chars().last() else {
        return false;
    };
    if !matches!(unit.to_ascii_uppercase(), 'K' | 'M' | 'G') {
        return false;
    }
    is_decimal(&token[..token.len() - unit.len_utf8()])
}

/// Converts a size string such as `5000K`, `5.6M` or `1GB` to bits.
///
/// Units are decimal (`K` = 1000 bytes) and case-insensitive; `KB`/`MB`/`GB`
/// are accepted as long forms. Returns 0 for an unrecognized unit or a
/// malformed number, which callers treat as "skip re-encode".
pub fn convert_to_bits(size: &str) -> u64 {
    let size = size.trim().to_ascii_uppercase();
    let split = size
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(size.len());
    let (number, unit) = size.split_at(split);

    let exponent = match unit {
        "K" | "KB" => 1,
        "M" | "MB" => 2,
        "G" | "GB" => 3,
        _ => return 0,
    };
    if !is_decimal(number) {
        return 0;
    }
    let Ok(value) = number.parse::<f64>() else {
        return 0;
    };

    let mut bits = value;
    for _ in 0..exponent {
        bits *= 1000.0;
    }
    (bits * 8.0) as u64
}

/// `\d+(\.\d+)?`
fn is_decimal(s: &str) -> bool {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };
    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.map_or(true, all_digits)
}
