//! Theme stylesheet generated from the stored site colors.
//!
//! Served as a stylesheet rather than inline styles so the CSP can keep
//! `style-src 'self'`.

use std::fmt::Write as _;

use axum::{
    extract::State,
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
};
use brand_mappers_core::content::{SiteColors, ThemeSection};

use crate::state::AppState;

/// `GET /theme.css`
pub async fn stylesheet(State(state): State<AppState>) -> impl IntoResponse {
    let theme: ThemeSection = state.content().load().await;
    (
        [
            (CONTENT_TYPE, "text/css; charset=utf-8"),
            (CACHE_CONTROL, "no-cache"),
        ],
        render_css(&theme.colors),
    )
}

/// Render `:root` custom properties. Colors are validated hex, so no
/// escaping is needed.
fn render_css(colors: &SiteColors) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in colors.css_variables() {
        let _ = writeln!(css, "  {name}: {value};");
    }
    css.push_str("}\n");
    css
}

#[cfg(test)]
mod tests {
    use brand_mappers_core::content::Document;

    use super::*;

    #[test]
    fn test_render_css_lists_every_color() {
        let css = render_css(&SiteColors::fallback());
        assert!(css.starts_with(":root {"));
        assert_eq!(css.matches("--color-").count(), 7);
        assert!(css.contains(&format!("--color-primary: {};", SiteColors::fallback().primary)));
    }
}
