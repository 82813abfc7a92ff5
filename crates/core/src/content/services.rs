//! Services grid.

use serde::{Deserialize, Serialize};

use super::validate::{check_required, check_text};
use super::{Document, ListItem, ValidationError};
use crate::define_section;
use crate::store::SettingKey;

/// Icon given to services added from the dashboard.
pub const DEFAULT_SERVICE_ICON: &str = "Settings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicesContent {
    pub title: String,
    pub subtitle: String,
}

impl Document for ServicesContent {
    const KEY: SettingKey = SettingKey::ServicesContent;

    fn fallback() -> Self {
        Self {
            title: "Our Services".to_string(),
            subtitle: "What We Deliver".to_string(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_required("title", &self.title)?;
        check_text("subtitle", &self.subtitle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
}

impl ListItem for Service {
    const KEY: SettingKey = SettingKey::ServicesList;

    fn defaults() -> Vec<Self> {
        [
            (
                "Exhibitions & Events",
                "End-to-end exhibition solutions from concept to execution",
                "Calendar",
            ),
            (
                "Brand Activations",
                "Creating memorable brand experiences that engage your audience",
                "Zap",
            ),
            (
                "Printing & Signage",
                "High-quality printing solutions for all your marketing needs",
                "Printer",
            ),
            (
                "Creative Design",
                "Innovative design solutions that make your brand stand out",
                "Palette",
            ),
            (
                "Digital Marketing",
                "Comprehensive digital strategies to grow your online presence",
                "Globe",
            ),
            (
                "Video Production",
                "Professional video content that tells your brand story",
                "Video",
            ),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (title, description, icon))| Self {
            id: (i + 1).to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
        })
        .collect()
    }

    fn item_id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_text("title", &self.title)?;
        check_text("description", &self.description)?;
        check_text("icon", &self.icon)
    }
}

define_section! {
    /// Services heading and list, saved together.
    pub struct ServicesSection {
        slug: "services",
        title: "Services",
        description: "Add, edit, or remove services offered",
        pub content: ServicesContent,
        pub items: Vec<Service>,
    }
}
