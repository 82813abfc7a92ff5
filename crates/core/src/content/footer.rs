//! Footer: company blurb, contact details, quick links, social links.

use serde::{Deserialize, Serialize};

use super::validate::{check_list_len, check_text, check_unique_ids, check_url};
use super::{Document, ValidationError};
use crate::define_section;
use crate::store::SettingKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickLink {
    pub id: String,
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: String,
    pub platform: String,
    pub url: String,
    /// Icon name, e.g. `Linkedin`.
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterContent {
    pub company_description: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub quick_links: Vec<QuickLink>,
    pub social_links: Vec<SocialLink>,
}

impl Document for FooterContent {
    const KEY: SettingKey = SettingKey::FooterContent;

    fn fallback() -> Self {
        let quick_links = [
            ("Home", "/"),
            ("About", "#about"),
            ("Services", "#services"),
            ("Portfolio", "#portfolio"),
            ("Careers", "/careers"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, href))| QuickLink {
            id: (i + 1).to_string(),
            name: name.to_string(),
            href: href.to_string(),
        })
        .collect();

        let social_links = [
            ("Facebook", "https://facebook.com", "Facebook"),
            ("Instagram", "https://instagram.com", "Instagram"),
            ("LinkedIn", "https://linkedin.com", "Linkedin"),
            ("Twitter", "https://twitter.com", "Twitter"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (platform, url, icon))| SocialLink {
            id: (i + 1).to_string(),
            platform: platform.to_string(),
            url: url.to_string(),
            icon: icon.to_string(),
        })
        .collect();

        Self {
            company_description: "Brand Mappers is a leading BTL advertising agency \
                                  transforming brands through exceptional events, \
                                  exhibitions, and creative design solutions."
                .to_string(),
            address: "123 Business Park, Dubai, UAE".to_string(),
            phone: "+971 4 123 4567".to_string(),
            email: "info@brandmappers.com".to_string(),
            quick_links,
            social_links,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_text("companyDescription", &self.company_description)?;
        check_text("address", &self.address)?;
        check_text("phone", &self.phone)?;
        check_text("email", &self.email)?;

        check_list_len(self.quick_links.len())?;
        check_unique_ids(self.quick_links.iter().map(|l| Some(l.id.as_str())))?;
        for link in &self.quick_links {
            check_text("name", &link.name)?;
            check_url("href", &link.href)?;
        }

        check_list_len(self.social_links.len())?;
        check_unique_ids(self.social_links.iter().map(|l| Some(l.id.as_str())))?;
        for link in &self.social_links {
            check_text("platform", &link.platform)?;
            check_text("icon", &link.icon)?;
            check_url("url", &link.url)?;
        }
        Ok(())
    }
}

define_section! {
    /// Footer content.
    pub struct FooterSection {
        slug: "footer",
        title: "Footer",
        description: "Edit footer content and links",
        pub content: FooterContent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_social_link_must_be_http() {
        let mut footer = FooterContent::fallback();
        footer.social_links[0].url = "javascript:alert(1)".to_string();
        assert!(footer.validate().is_err());
    }

    #[test]
    fn test_quick_link_ids_unique() {
        let mut footer = FooterContent::fallback();
        footer.quick_links[1].id = "1".to_string();
        assert_eq!(
            footer.validate(),
            Err(ValidationError::DuplicateId("1".to_string()))
        );
    }
}
