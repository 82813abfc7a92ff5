//! Custom Askama template filters.

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a count with thousands separators, e.g. `5000` as `5,000`.
///
/// Usage in templates: `{{ stat.value|thousands }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn thousands(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(group_digits(&value.to_string()))
}

fn group_digits(digits: &str) -> String {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("5"), "5");
        assert_eq!(group_digits("500"), "500");
        assert_eq!(group_digits("5000"), "5,000");
        assert_eq!(group_digits("1234567"), "1,234,567");
    }

    #[test]
    fn test_group_digits_leaves_text_alone() {
        assert_eq!(group_digits("50+"), "50+");
    }
}
