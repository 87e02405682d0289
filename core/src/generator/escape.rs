pub const NULL_LITERAL: &str = "NULL";

fn is_null_marker(value: &str, null_values: &[String]) -> bool {
    let normalised = value.trim().to_lowercase();
    null_values.iter().any(|marker| marker.trim().to_lowercase() == normalised)
}

fn truncate_float_text(value: &str) -> Option<String> {
    let parsed = value.trim().parse::<f64>().ok()?;
    if !parsed.is_finite() {
        return None;
    }

    let truncated = parsed.trunc();
    if truncated == 0.0 {
        return Some("0".to_string());
    }

    // exact integer value of the float, no matter how large
    Some(format!("{:.0}", truncated))
}

/// Canonical decimal form of `[+-]?[0-9]+` of any length: no `+`, no leading
/// zeros, no `-0`.
fn canonical_integer(value: &str) -> Option<String> {
    let (negative, digits) = match value.as_bytes().first()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Some("0".to_string());
    }

    Some(if negative { format!("-{}", digits) } else { digits.to_string() })
}

/// Renders a single value as a SQL literal.
///
/// Anything that parses as a number is emitted unquoted, even when the column
/// is meant to hold text (zip codes, phone numbers). Callers that care must
/// pre-sanitise those values.
pub fn escape_value(value: Option<&str>, null_values: &[String]) -> String {
    let value = match value {
        Some(value) if !is_null_marker(value, null_values) => value,
        _ => return NULL_LITERAL.to_string(),
    };

    if value.ends_with(".0") {
        if let Some(truncated) = truncate_float_text(value) {
            return truncated;
        }
    }

    let trimmed = value.trim();
    if let Some(int_value) = canonical_integer(trimmed) {
        return int_value;
    }

    if let Ok(float_value) = trimmed.parse::<f64>() {
        return float_value.to_string();
    }

    quote_string(value)
}

pub fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Wraps a table or column name in backticks, doubling any backtick inside it.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
