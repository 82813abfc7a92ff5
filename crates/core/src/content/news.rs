//! News and press items.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validate::{check_text, check_url};
use super::{ListItem, ValidationError};
use crate::define_section;
use crate::store::SettingKey;

/// A dated news entry. `date` is stored as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub date: NaiveDate,
    pub category: String,
    pub image: String,
}

impl NewsItem {
    /// Date as shown on the site, e.g. `January 15, 2024`.
    #[must_use]
    pub fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}

impl ListItem for NewsItem {
    const KEY: SettingKey = SettingKey::NewsItems;

    fn defaults() -> Vec<Self> {
        vec![
            Self {
                id: "1".to_string(),
                title: "Brand Mappers Wins Best Exhibition Award".to_string(),
                excerpt: "We're proud to announce our latest achievement in the industry..."
                    .to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default(),
                category: "Awards".to_string(),
                image: String::new(),
            },
            Self {
                id: "2".to_string(),
                title: "New Office Opening in Dubai".to_string(),
                excerpt: "Expanding our presence in the Middle East region...".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap_or_default(),
                category: "Company News".to_string(),
                image: String::new(),
            },
        ]
    }

    fn item_id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_text("title", &self.title)?;
        check_text("excerpt", &self.excerpt)?;
        check_text("category", &self.category)?;
        check_url("image", &self.image)
    }
}

define_section! {
    /// News list.
    pub struct NewsSection {
        slug: "news",
        title: "News",
        description: "Publish and manage news articles",
        pub items: Vec<NewsItem>,
    }
}

impl NewsSection {
    /// Items ordered newest first; equal dates keep their stored order.
    #[must_use]
    pub fn newest_first(&self) -> Vec<&NewsItem> {
        let mut items: Vec<&NewsItem> = self.items.iter().collect();
        items.sort_by(|a, b| b.date.cmp(&a.date));
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Section;

    #[test]
    fn test_newest_first() {
        let mut section = NewsSection::defaults();
        section.items.reverse();
        let titles: Vec<&str> = section
            .newest_first()
            .into_iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(
            titles,
            [
                "Brand Mappers Wins Best Exhibition Award",
                "New Office Opening in Dubai"
            ]
        );
    }

    #[test]
    fn test_display_date() {
        let item = &NewsItem::defaults()[0];
        assert_eq!(item.display_date(), "January 15, 2024");
    }

    #[test]
    fn test_bad_date_is_malformed() {
        let value = serde_json::json!([{
            "id": "1", "title": "t", "excerpt": "", "date": "15/01/2024",
            "category": "", "image": ""
        }]);
        assert!(crate::content::decode::<Vec<NewsItem>>(&value).is_err());
    }

    #[test]
    fn test_date_serializes_as_iso_day() {
        let json = serde_json::to_value(&NewsItem::defaults()[0]).unwrap_or_default();
        assert_eq!(json["date"], "2024-01-15");
    }
}
