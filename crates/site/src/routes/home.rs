//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State, rejection::QueryRejection};
use brand_mappers_core::content::portfolio::ALL_CATEGORIES;
use brand_mappers_core::content::{
    AboutSection, ClientsSection, CtaSection, HeroSection, HeroVideo, NewsItem, NewsSection,
    PortfolioItem, PortfolioSection, ServicesSection, ThemeSection,
};
use tracing::instrument;

use super::PageChrome;
use crate::filters;
use crate::state::AppState;

/// Query parameters accepted by the home page.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct HomeQuery {
    /// Portfolio filter tab.
    pub category: Option<String>,
    /// One-shot banner requested by a redirect.
    pub notice: Option<String>,
}

impl HomeQuery {
    /// Pick the known parameters out of raw pairs. The first occurrence of a
    /// repeated parameter wins and unknown ones are ignored, so no query
    /// string can turn the page into an error.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (name, value) in pairs {
            let slot = match name.as_str() {
                "category" => &mut query.category,
                "notice" => &mut query.notice,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

/// Banner shown at the top of the page after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The admin dashboard turned away a signed-in non-admin.
    AccessDenied,
}

impl Notice {
    /// Parse the `notice` query value. Unknown values are ignored.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "access-denied" => Some(Self::AccessDenied),
            _ => None,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::AccessDenied => "Access Denied",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AccessDenied => "You don't have admin privileges.",
        }
    }
}

/// One portfolio filter tab.
pub struct CategoryTab<'a> {
    pub name: &'a str,
    pub active: bool,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: PageChrome,
    pub notice: Option<Notice>,
    pub hero: HeroSection,
    pub hero_video: HeroVideo,
    pub theme: ThemeSection,
    pub about: AboutSection,
    pub services: ServicesSection,
    pub portfolio: PortfolioSection,
    pub active_category: String,
    pub clients: ClientsSection,
    pub news: NewsSection,
    pub cta: CtaSection,
}

impl HomeTemplate {
    /// Filter tabs with the active one marked.
    pub fn category_tabs(&self) -> Vec<CategoryTab<'_>> {
        self.portfolio
            .categories()
            .into_iter()
            .map(|name| CategoryTab {
                name,
                active: name == self.active_category,
            })
            .collect()
    }

    /// Portfolio tiles for the active tab.
    pub fn portfolio_items(&self) -> Vec<&PortfolioItem> {
        self.portfolio.filtered(&self.active_category)
    }

    /// News cards, newest first.
    pub fn news_items(&self) -> Vec<&NewsItem> {
        self.news.newest_first()
    }
}

/// Display the home page.
///
/// Every section hydrates independently; a missing or unreadable key only
/// affects its own section, which renders its default.
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> HomeTemplate {
    let query = HomeQuery::from_pairs(pairs.map(|Query(p)| p).unwrap_or_default());
    let content = state.content();

    let (chrome, hero, hero_video, theme, about, services, portfolio, clients, news, cta) = tokio::join!(
        PageChrome::load(content),
        content.load::<HeroSection>(),
        content.load_document::<HeroVideo>(),
        content.load::<ThemeSection>(),
        content.load::<AboutSection>(),
        content.load::<ServicesSection>(),
        content.load::<PortfolioSection>(),
        content.load::<ClientsSection>(),
        content.load::<NewsSection>(),
        content.load::<CtaSection>(),
    );

    let categories = portfolio.categories();
    let active_category = query
        .category
        .filter(|c| categories.contains(&c.as_str()))
        .unwrap_or_else(|| ALL_CATEGORIES.to_string());

    HomeTemplate {
        chrome,
        notice: query.notice.as_deref().and_then(Notice::parse),
        hero,
        hero_video,
        theme,
        about,
        services,
        portfolio,
        active_category,
        clients,
        news,
        cta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_parameter_keeps_first() {
        let query = HomeQuery::from_pairs(pairs(&[
            ("category", "Events"),
            ("utm_source", "mail"),
            ("category", "Exhibitions"),
            ("notice", "access-denied"),
        ]));
        assert_eq!(query.category.as_deref(), Some("Events"));
        assert_eq!(query.notice.as_deref(), Some("access-denied"));
        assert_eq!(HomeQuery::from_pairs(Vec::new()), HomeQuery::default());
    }

    #[test]
    fn test_notice_parse() {
        assert_eq!(Notice::parse("access-denied"), Some(Notice::AccessDenied));
        assert_eq!(Notice::parse("welcome"), None);
        assert_eq!(Notice::parse(""), None);
    }
}
