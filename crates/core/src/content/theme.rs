//! Site palette and the animated hero background.

use serde::{Deserialize, Serialize};

use super::validate::{check_hex_color, check_hex_literal, check_range};
use super::{Document, ValidationError};
use crate::define_section;
use crate::store::SettingKey;

/// Palette emitted as CSS custom properties; every value is `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteColors {
    pub primary: String,
    pub accent: String,
    pub background: String,
    pub foreground: String,
    pub muted: String,
    pub card: String,
    pub border: String,
}

impl SiteColors {
    /// `(css variable name, value)` pairs in declaration order.
    #[must_use]
    pub fn css_variables(&self) -> [(&'static str, &str); 7] {
        [
            ("--color-primary", self.primary.as_str()),
            ("--color-accent", self.accent.as_str()),
            ("--color-background", self.background.as_str()),
            ("--color-foreground", self.foreground.as_str()),
            ("--color-muted", self.muted.as_str()),
            ("--color-card", self.card.as_str()),
            ("--color-border", self.border.as_str()),
        ]
    }
}

impl Document for SiteColors {
    const KEY: SettingKey = SettingKey::SiteColors;

    fn fallback() -> Self {
        Self {
            primary: "#8e2881".to_string(),
            accent: "#b03aa0".to_string(),
            background: "#0a0a0a".to_string(),
            foreground: "#fafafa".to_string(),
            muted: "#1a1a1a".to_string(),
            card: "#111111".to_string(),
            border: "#262626".to_string(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_hex_color("primary", &self.primary)?;
        check_hex_color("accent", &self.accent)?;
        check_hex_color("background", &self.background)?;
        check_hex_color("foreground", &self.foreground)?;
        check_hex_color("muted", &self.muted)?;
        check_hex_color("card", &self.card)?;
        check_hex_color("border", &self.border)
    }
}

/// Parameters for the hero's network-of-dots background animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VantaSettings {
    /// `0xrrggbb`
    pub color: String,
    /// `0xrrggbb`
    pub background_color: String,
    pub points: u32,
    pub max_distance: f64,
    pub spacing: f64,
    pub show_dots: bool,
}

impl Document for VantaSettings {
    const KEY: SettingKey = SettingKey::VantaSettings;

    fn fallback() -> Self {
        Self {
            color: "0x8e2881".to_string(),
            background_color: "0x0a0a0a".to_string(),
            points: 12,
            max_distance: 20.0,
            spacing: 15.0,
            show_dots: true,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_hex_literal("color", &self.color)?;
        check_hex_literal("backgroundColor", &self.background_color)?;
        check_range("points", self.points, 1..=20)?;
        check_range("maxDistance", self.max_distance, 10.0..=40.0)?;
        check_range("spacing", self.spacing, 10.0..=20.0)
    }
}

define_section! {
    /// Palette and background animation, saved together.
    pub struct ThemeSection {
        slug: "theme",
        title: "Theme",
        description: "Customize site colors and theme settings",
        pub colors: SiteColors,
        pub vanta: VantaSettings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SiteColors::fallback().validate().is_ok());
        assert!(VantaSettings::fallback().validate().is_ok());
    }

    #[test]
    fn test_color_injection_rejected() {
        let mut colors = SiteColors::fallback();
        colors.background = "#000; background-image: url(x)".to_string();
        assert!(colors.validate().is_err());
    }

    #[test]
    fn test_vanta_ranges() {
        let mut vanta = VantaSettings::fallback();
        vanta.points = 50;
        assert!(vanta.validate().is_err());
    }

    #[test]
    fn test_integer_json_numbers_accepted() {
        let value = serde_json::json!({
            "color": "0x8e2881", "backgroundColor": "0x0a0a0a",
            "points": 12, "maxDistance": 20, "spacing": 15, "showDots": true
        });
        let vanta: VantaSettings = crate::content::decode(&value).unwrap_or_else(|_| {
            VantaSettings {
                points: 0,
                ..VantaSettings::fallback()
            }
        });
        assert_eq!(vanta.points, 12);
    }
}
