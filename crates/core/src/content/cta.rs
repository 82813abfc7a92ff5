//! Closing call to action above the contact form.

use serde::{Deserialize, Serialize};

use super::validate::{check_required, check_text};
use super::{Document, ValidationError};
use crate::define_section;
use crate::store::SettingKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaContent {
    pub headline: String,
    pub description: String,
    pub primary_button: String,
    pub secondary_button: String,
}

impl Document for CtaContent {
    const KEY: SettingKey = SettingKey::CtaContent;

    fn fallback() -> Self {
        Self {
            headline: "Ready to Transform Your Brand?".to_string(),
            description: "Let's create something extraordinary together. Get in touch with \
                          our team to discuss your next project."
                .to_string(),
            primary_button: "Get Started".to_string(),
            secondary_button: "Schedule a Call".to_string(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_required("headline", &self.headline)?;
        check_text("description", &self.description)?;
        check_text("primaryButton", &self.primary_button)?;
        check_text("secondaryButton", &self.secondary_button)
    }
}

define_section! {
    /// Call-to-action copy.
    pub struct CtaSection {
        slug: "cta",
        title: "CTA section",
        description: "Edit call-to-action content",
        pub content: CtaContent,
    }
}
