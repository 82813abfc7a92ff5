//! Portfolio gallery with category filtering.

use serde::{Deserialize, Serialize};

use super::validate::{check_text, check_url};
use super::{ListItem, ValidationError};
use crate::define_section;
use crate::store::SettingKey;

/// Pseudo-category that shows every item.
pub const ALL_CATEGORIES: &str = "All";

/// Tile footprint in the masonry grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TileSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl TileSize {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl std::fmt::Display for TileSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: String,
    pub title: String,
    pub category: String,
    pub image: String,
    pub size: TileSize,
}

impl ListItem for PortfolioItem {
    const KEY: SettingKey = SettingKey::PortfolioItems;

    fn defaults() -> Vec<Self> {
        [
            ("Tech Conference 2024", "Exhibitions", TileSize::Large),
            ("Product Launch Event", "Activations", TileSize::Medium),
            ("Corporate Branding", "Printing", TileSize::Small),
            ("Trade Show Booth", "Stands", TileSize::Medium),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (title, category, size))| Self {
            id: (i + 1).to_string(),
            title: title.to_string(),
            category: category.to_string(),
            image: format!("/static/images/portfolio-{}.jpg", i + 1),
            size,
        })
        .collect()
    }

    fn item_id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_text("title", &self.title)?;
        check_text("category", &self.category)?;
        check_url("image", &self.image)
    }
}

define_section! {
    /// Gallery items.
    pub struct PortfolioSection {
        slug: "portfolio",
        title: "Portfolio",
        description: "Manage portfolio items and categories",
        pub items: Vec<PortfolioItem>,
    }
}

impl PortfolioSection {
    /// Filter tabs: `All` followed by each distinct category in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut out = vec![ALL_CATEGORIES];
        for item in &self.items {
            let category = item.category.as_str();
            if !category.is_empty() && !out.contains(&category) {
                out.push(category);
            }
        }
        out
    }

    /// Items in `category`; `All` or an unknown category shows everything.
    #[must_use]
    pub fn filtered(&self, category: &str) -> Vec<&PortfolioItem> {
        let known = self.items.iter().any(|i| i.category == category);
        self.items
            .iter()
            .filter(|i| !known || i.category == category)
            .collect()
    }
}
