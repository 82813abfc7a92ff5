//! Hero banner: headline copy, headline stats, and the background video.

use serde::{Deserialize, Serialize};

use super::validate::{check_required, check_text, check_url};
use super::{Document, ListItem, ValidationError};
use crate::define_section;
use crate::store::SettingKey;

/// Path of the video bundled with the site, used until one is uploaded.
pub const BUNDLED_VIDEO: &str = "/static/video/hero-video.mp4";

/// Copy shown over the hero video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    pub badge: String,
    /// Line breaks split the rendered title into separate lines.
    pub headline: String,
    pub tagline: String,
    pub cta_text: String,
    pub cta_secondary_text: String,
}

impl HeroContent {
    /// Headline split on newlines, blank lines dropped.
    #[must_use]
    pub fn headline_lines(&self) -> Vec<&str> {
        self.headline
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }
}

impl Document for HeroContent {
    const KEY: SettingKey = SettingKey::HeroContent;

    fn fallback() -> Self {
        Self {
            badge: "BTL Advertising Excellence Since 2016".to_string(),
            headline: "GROW BIGGER.\nEVERYDAY.".to_string(),
            tagline: "Your One-Stop BTL Advertising Partner. Transforming brands through \
                      exceptional events, exhibitions, and creative design solutions."
                .to_string(),
            cta_text: "Start Your Project".to_string(),
            cta_secondary_text: "View Our Work".to_string(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_text("badge", &self.badge)?;
        check_required("headline", &self.headline)?;
        check_text("tagline", &self.tagline)?;
        check_text("ctaText", &self.cta_text)?;
        check_text("ctaSecondaryText", &self.cta_secondary_text)
    }
}

/// One figure in the hero stats strip, e.g. `5000+ Projects Delivered`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroStat {
    pub value: String,
    pub label: String,
}

impl ListItem for HeroStat {
    const KEY: SettingKey = SettingKey::HeroStats;

    fn defaults() -> Vec<Self> {
        [
            ("5000+", "Projects Delivered"),
            ("8+", "Years Experience"),
            ("15+", "Countries Served"),
            ("50+", "Team Members"),
        ]
        .into_iter()
        .map(|(value, label)| Self {
            value: value.to_string(),
            label: label.to_string(),
        })
        .collect()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_text("value", &self.value)?;
        check_text("label", &self.label)
    }
}

/// Uploaded background video. Written by the video uploader, not the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HeroVideo {
    pub url: Option<String>,
}

impl HeroVideo {
    /// Uploaded video, or the bundled one.
    #[must_use]
    pub fn src(&self) -> &str {
        self.url
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(BUNDLED_VIDEO)
    }
}

impl Document for HeroVideo {
    const KEY: SettingKey = SettingKey::HeroVideo;

    fn fallback() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.url.as_deref().map_or(Ok(()), |u| check_url("url", u))
    }
}

define_section! {
    /// Hero copy and stats, saved together.
    pub struct HeroSection {
        slug: "hero",
        title: "Hero section",
        description: "Edit headline, tagline, stats, and video background",
        pub content: HeroContent,
        pub stats: Vec<HeroStat>,
    }
}
