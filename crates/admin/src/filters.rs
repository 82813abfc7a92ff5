//! Custom Askama template filters.

use std::fmt::Display;

/// Escape serialized JSON for an inline `<script type="application/json">`.
///
/// `<`, `>` and `&` become JSON unicode escapes, so a stored `</script>`
/// cannot end the element early. The result is still valid JSON.
///
/// Usage in templates: `{{ document_json|json_script|safe }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn json_script(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(escape_json_for_script(&value.to_string()))
}

fn escape_json_for_script(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_script_close_is_escaped() {
        let json = serde_json::json!({"headline": "</script><b>&"}).to_string();
        let escaped = escape_json_for_script(&json);
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('&'));

        let back: serde_json::Value = serde_json::from_str(&escaped).unwrap();
        assert_eq!(back["headline"], "</script><b>&");
    }
}
