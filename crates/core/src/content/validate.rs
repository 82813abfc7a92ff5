//! Field checks shared by the content documents.

use std::collections::HashSet;

use super::ValidationError;

/// Longest text any single content field may hold.
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Most items any stored list may hold.
pub const MAX_LIST_ITEMS: usize = 100;

pub(crate) fn check_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > MAX_TEXT_LENGTH {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_TEXT_LENGTH,
        });
    }
    Ok(())
}

pub(crate) fn check_required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    check_text(field, value)
}

pub(crate) const fn check_list_len(len: usize) -> Result<(), ValidationError> {
    if len > MAX_LIST_ITEMS {
        return Err(ValidationError::TooManyItems {
            len,
            max: MAX_LIST_ITEMS,
        });
    }
    Ok(())
}

/// Ids must be non-empty and distinct. Items without ids are skipped.
pub(crate) fn check_unique_ids<'a>(
    ids: impl Iterator<Item = Option<&'a str>>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for id in ids.flatten() {
        if id.trim().is_empty() {
            return Err(ValidationError::MissingId);
        }
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}

/// Links and asset URLs end up in `href`/`src` attributes.
///
/// Empty, site-relative, fragment, `http(s)`, `mailto:` and `tel:` values pass.
/// Anything else (notably `javascript:` and `data:`) is rejected.
pub(crate) fn check_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    check_text(field, value)?;
    let value = value.trim();
    if value.is_empty() || value.starts_with('#') {
        return Ok(());
    }
    if value.starts_with('/') && !value.starts_with("//") {
        return Ok(());
    }
    let lower = value.to_ascii_lowercase();
    let allowed = ["https://", "http://", "mailto:", "tel:"];
    if allowed.iter().any(|scheme| lower.starts_with(scheme)) {
        return Ok(());
    }
    Err(ValidationError::Invalid {
        field,
        reason: format!("unsupported link {value:?}"),
    })
}

/// `#rrggbb`, used for theme colors injected into CSS.
pub(crate) fn check_hex_color(field: &'static str, value: &str) -> Result<(), ValidationError> {
    match value.strip_prefix('#') {
        Some(hex) if is_hex6(hex) => Ok(()),
        _ => Err(ValidationError::Invalid {
            field,
            reason: format!("expected #rrggbb, got {value:?}"),
        }),
    }
}

/// `0xrrggbb`, the notation the background animation reads.
pub(crate) fn check_hex_literal(field: &'static str, value: &str) -> Result<(), ValidationError> {
    match value.strip_prefix("0x") {
        Some(hex) if is_hex6(hex) => Ok(()),
        _ => Err(ValidationError::Invalid {
            field,
            reason: format!("expected 0xrrggbb, got {value:?}"),
        }),
    }
}

pub(crate) fn check_range<T>(
    field: &'static str,
    value: T,
    range: std::ops::RangeInclusive<T>,
) -> Result<(), ValidationError>
where
    T: PartialOrd + std::fmt::Display,
{
    if range.contains(&value) {
        return Ok(());
    }
    Err(ValidationError::Invalid {
        field,
        reason: format!(
            "{value} is outside {}..={}",
            range.start(),
            range.end()
        ),
    })
}

fn is_hex6(s: &str) -> bool {
    s.len() == 6 && s.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_url_accepts_site_links() {
        for ok in [
            "",
            "#about",
            "/careers",
            "https://instagram.com",
            "HTTP://example.com",
            "mailto:info@brand-mappers.com",
            "tel:+97141234567",
        ] {
            assert!(check_url("href", ok).is_ok(), "{ok} should pass");
        }
    }

    #[test]
    fn test_check_url_rejects_scripts() {
        for bad in [
            "javascript:alert(1)",
            " JavaScript:alert(1)",
            "data:text/html,hi",
            "//evil.example",
            "ftp://files",
        ] {
            assert!(check_url("href", bad).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn test_check_hex_color() {
        assert!(check_hex_color("primary", "#8e2881").is_ok());
        assert!(check_hex_color("primary", "#8E2881").is_ok());
        assert!(check_hex_color("primary", "8e2881").is_err());
        assert!(check_hex_color("primary", "#8e288").is_err());
        assert!(check_hex_color("primary", "#8e2881; }").is_err());
    }

    #[test]
    fn test_check_hex_literal() {
        assert!(check_hex_literal("color", "0x8e2881").is_ok());
        assert!(check_hex_literal("color", "#8e2881").is_err());
    }

    #[test]
    fn test_check_required() {
        assert_eq!(
            check_required("headline", "   "),
            Err(ValidationError::Empty { field: "headline" })
        );
        assert!(check_required("headline", "GROW").is_ok());
    }

    #[test]
    fn test_check_text_counts_chars() {
        let long = "é".repeat(MAX_TEXT_LENGTH);
        assert!(check_text("body", &long).is_ok());
        let too_long = "a".repeat(MAX_TEXT_LENGTH + 1);
        assert!(check_text("body", &too_long).is_err());
    }

    #[test]
    fn test_check_range() {
        assert!(check_range("points", 12_u32, 1..=20).is_ok());
        assert!(check_range("points", 0_u32, 1..=20).is_err());
    }
}
