//! About section: company story and animated counters.

use serde::{Deserialize, Serialize};

use super::validate::{check_required, check_text};
use super::{Document, ListItem, ValidationError};
use crate::define_section;
use crate::store::SettingKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub secondary_description: String,
}

impl Document for AboutContent {
    const KEY: SettingKey = SettingKey::AboutContent;

    fn fallback() -> Self {
        Self {
            title: "About Us".to_string(),
            subtitle: "Crafting Brand Experiences".to_string(),
            description: "Since 2016, Brand Mappers has been at the forefront of BTL \
                          advertising, transforming how brands connect with their audiences. \
                          We specialize in creating immersive experiences that leave lasting \
                          impressions."
                .to_string(),
            secondary_description: "From Egypt to the Gulf, across Africa to the Americas \
                                    and Canada, we've helped brands grow bigger every day \
                                    through exceptional events, stunning exhibitions, and \
                                    innovative design solutions."
                .to_string(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_required("title", &self.title)?;
        check_text("subtitle", &self.subtitle)?;
        check_text("description", &self.description)?;
        check_text("secondaryDescription", &self.secondary_description)
    }
}

/// Counter such as `15+ Countries Served`; `value` animates up from zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutStat {
    /// Icon name from the site's icon set, e.g. `Briefcase`.
    pub icon: String,
    pub value: u32,
    pub suffix: String,
    pub label: String,
}

impl ListItem for AboutStat {
    const KEY: SettingKey = SettingKey::AboutStats;

    fn defaults() -> Vec<Self> {
        [
            ("Briefcase", 5000, "Projects Completed"),
            ("Award", 8, "Years in Business"),
            ("Globe", 15, "Countries Served"),
            ("Users", 50, "Team Members"),
        ]
        .into_iter()
        .map(|(icon, value, label)| Self {
            icon: icon.to_string(),
            value,
            suffix: "+".to_string(),
            label: label.to_string(),
        })
        .collect()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_text("icon", &self.icon)?;
        check_text("suffix", &self.suffix)?;
        check_text("label", &self.label)
    }
}

define_section! {
    /// About copy and counters, saved together.
    pub struct AboutSection {
        slug: "about",
        title: "About section",
        description: "Manage company information and statistics",
        pub content: AboutContent,
        pub stats: Vec<AboutStat>,
    }
}
