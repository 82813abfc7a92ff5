//! Top navigation menu.

use serde::{Deserialize, Serialize};

use super::validate::{check_text, check_url};
use super::{ListItem, ValidationError};
use crate::define_section;
use crate::store::SettingKey;

/// Menu entry; disabled entries stay stored but are not rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub id: String,
    pub name: String,
    pub href: String,
    pub enabled: bool,
}

impl ListItem for NavItem {
    const KEY: SettingKey = SettingKey::NavigationItems;

    fn defaults() -> Vec<Self> {
        [
            ("Home", "#home"),
            ("About", "#about"),
            ("Services", "#services"),
            ("Portfolio", "#portfolio"),
            ("News", "#news"),
            ("Careers", "/careers"),
            ("Contact", "#contact"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, href))| Self {
            id: (i + 1).to_string(),
            name: name.to_string(),
            href: href.to_string(),
            enabled: true,
        })
        .collect()
    }

    fn item_id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_text("name", &self.name)?;
        check_url("href", &self.href)
    }
}

define_section! {
    /// Menu entries in display order.
    pub struct NavigationSection {
        slug: "navigation",
        title: "Navigation",
        description: "Manage navigation menu items",
        pub items: Vec<NavItem>,
    }
}

impl NavigationSection {
    #[must_use]
    pub fn enabled(&self) -> Vec<&NavItem> {
        self.items.iter().filter(|i| i.enabled).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Section;

    #[test]
    fn test_disabled_items_hidden() {
        let mut nav = NavigationSection::defaults();
        nav.items[4].enabled = false;
        let names: Vec<&str> = nav.enabled().iter().map(|i| i.name.as_str()).collect();
        assert!(!names.contains(&"News"));
        assert_eq!(names.len(), 6);
    }
}
