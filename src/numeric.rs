//! Lenient number handling for user-typed amounts and NaN-tolerant aggregates.

/// Recover a number from text such as `"1,000,000"` or `"₩ 25,000"`.
///
/// Every character other than an ASCII digit, `.` or `-` is dropped, then the
/// longest leading number is parsed. Anything unparsable yields 0.
pub fn parse_number_from_string(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    leading_number(&cleaned).unwrap_or(0.0)
}

/// Parse `-?digits*(.digits*)?` from the start of `s`, requiring at least one digit.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut i = 0;
    let negative = bytes.first() == Some(&b'-');
    if negative {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_part = &s[int_start..i];

    let mut frac_part = "";
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_part = &s[frac_start..j];
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let normalized = format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "0" } else { frac_part },
    );
    normalized.parse::<f64>().ok()
}

/// Parse the number at the start of the trimmed text (`"12abc"` is 12),
/// falling back to `default`.
pub fn safe_number(text: &str, default: f64) -> f64 {
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    match leading_number(unsigned) {
        Some(v) if !v.is_nan() => v,
        _ => default,
    }
}

fn finite_values(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    values.iter().copied().filter(|v| !v.is_nan())
}

/// Largest non-NaN value, 0 when there is none.
pub fn safe_max(values: &[f64]) -> f64 {
    finite_values(values).reduce(f64::max).unwrap_or(0.0)
}

/// Smallest non-NaN value, 0 when there is none.
pub fn safe_min(values: &[f64]) -> f64 {
    finite_values(values).reduce(f64::min).unwrap_or(0.0)
}

/// Mean of the non-NaN values, 0 when there is none.
pub fn safe_average(values: &[f64]) -> f64 {
    let (sum, count) = finite_values(values).fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Round to a whole number and group thousands: `1234567.4` → `"1,234,567"`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
