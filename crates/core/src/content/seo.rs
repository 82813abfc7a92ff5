//! Search and social metadata rendered into the page head.

use serde::{Deserialize, Serialize};

use super::validate::{check_required, check_text, check_url};
use super::{Document, ValidationError};
use crate::define_section;
use crate::store::SettingKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoSettings {
    pub site_title: String,
    pub site_description: String,
    /// Comma-separated keyword list.
    pub keywords: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    pub twitter_handle: String,
    /// Empty disables the analytics tag.
    pub google_analytics_id: String,
}

impl SeoSettings {
    /// Measurement id when analytics is configured.
    #[must_use]
    pub fn analytics_id(&self) -> Option<&str> {
        let id = self.google_analytics_id.trim();
        (!id.is_empty()).then_some(id)
    }
}

impl Document for SeoSettings {
    const KEY: SettingKey = SettingKey::SeoSettings;

    fn fallback() -> Self {
        Self {
            site_title: "Brand Mappers | BTL Advertising Excellence".to_string(),
            site_description: "Your One-Stop BTL Advertising Partner. Transforming brands \
                               through exceptional events, exhibitions, and creative design \
                               solutions since 2016."
                .to_string(),
            keywords: "BTL advertising, exhibitions, events, brand activation, printing, \
                       signage, Egypt, Dubai, Gulf"
                .to_string(),
            og_title: "Brand Mappers - Grow Bigger. Everyday.".to_string(),
            og_description: "Leading BTL advertising agency creating impactful brand \
                             experiences across Egypt, Gulf, Africa, and the Americas."
                .to_string(),
            og_image: String::new(),
            twitter_handle: "@brandmappers".to_string(),
            google_analytics_id: String::new(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_required("siteTitle", &self.site_title)?;
        check_text("siteDescription", &self.site_description)?;
        check_text("keywords", &self.keywords)?;
        check_text("ogTitle", &self.og_title)?;
        check_text("ogDescription", &self.og_description)?;
        check_url("ogImage", &self.og_image)?;
        check_text("twitterHandle", &self.twitter_handle)?;
        check_analytics_id(&self.google_analytics_id)
    }
}

/// `G-XXXX` or legacy `UA-XXXX-N`; the id is interpolated into a script tag.
fn check_analytics_id(id: &str) -> Result<(), ValidationError> {
    let id = id.trim();
    if id.is_empty() {
        return Ok(());
    }
    let body = id.strip_prefix("G-").or_else(|| id.strip_prefix("UA-"));
    match body {
        Some(rest)
            if !rest.is_empty()
                && rest
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-') =>
        {
            Ok(())
        }
        _ => Err(ValidationError::Invalid {
            field: "googleAnalyticsId",
            reason: format!("expected G-XXXXXXX or UA-XXXXX-N, got {id:?}"),
        }),
    }
}

define_section! {
    /// Site-wide metadata.
    pub struct SeoSection {
        slug: "seo",
        title: "SEO settings",
        description: "Manage meta tags, social previews, and analytics",
        pub settings: SeoSettings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analytics_id_formats() {
        assert!(check_analytics_id("").is_ok());
        assert!(check_analytics_id("G-ABC123XYZ").is_ok());
        assert!(check_analytics_id("UA-12345-1").is_ok());
        assert!(check_analytics_id("G-").is_err());
        assert!(check_analytics_id("G-abc'); alert(1); ('").is_err());
    }

    #[test]
    fn test_analytics_id_blank_means_disabled() {
        let mut seo = SeoSettings::fallback();
        assert_eq!(seo.analytics_id(), None);
        seo.google_analytics_id = "G-TEST1".to_string();
        assert_eq!(seo.analytics_id(), Some("G-TEST1"));
    }
}
