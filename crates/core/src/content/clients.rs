//! Client logo wall.

use serde::{Deserialize, Serialize};

use super::validate::{check_required, check_text, check_url};
use super::{Document, ListItem, ValidationError};
use crate::define_section;
use crate::store::SettingKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientsContent {
    pub title: String,
    pub subtitle: String,
}

impl Document for ClientsContent {
    const KEY: SettingKey = SettingKey::ClientsContent;

    fn fallback() -> Self {
        Self {
            title: "Trusted Partners".to_string(),
            subtitle: "Brands That Trust Us".to_string(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_required("title", &self.title)?;
        check_text("subtitle", &self.subtitle)
    }
}

/// A client; an empty `logo` renders the name as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub logo: String,
}

impl ListItem for Client {
    const KEY: SettingKey = SettingKey::ClientsList;

    fn defaults() -> Vec<Self> {
        ["One", "Two", "Three", "Four", "Five", "Six"]
            .into_iter()
            .enumerate()
            .map(|(i, n)| Self {
                id: (i + 1).to_string(),
                name: format!("Company {n}"),
                logo: String::new(),
            })
            .collect()
    }

    fn item_id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_text("name", &self.name)?;
        check_url("logo", &self.logo)
    }
}

define_section! {
    /// Clients heading and list, saved together.
    pub struct ClientsSection {
        slug: "clients",
        title: "Clients",
        description: "Edit client logos and testimonials",
        pub content: ClientsContent,
        pub items: Vec<Client>,
    }
}
