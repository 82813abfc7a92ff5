//! Typed content documents stored under the fixed settings keys.
//!
//! Every stored value is one [`Document`]: a serde type bound to a single
//! [`SettingKey`], with a hard-coded fallback and a validation rule. A
//! [`Section`] groups the documents that one editor page saves together.
//!
//! Decoding is validate-or-default: a stored value that is absent, fails to
//! deserialize, or fails [`Document::validate`] is replaced by
//! [`Document::fallback`], so every section is always renderable.

pub mod about;
pub mod clients;
pub mod cta;
pub mod footer;
pub mod hero;
pub mod navigation;
pub mod news;
pub mod portfolio;
pub mod seo;
pub mod services;
pub mod theme;
mod validate;

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::store::SettingKey;

pub use about::{AboutContent, AboutSection, AboutStat};
pub use clients::{Client, ClientsContent, ClientsSection};
pub use cta::{CtaContent, CtaSection};
pub use footer::{FooterContent, FooterSection, QuickLink, SocialLink};
pub use hero::{HeroContent, HeroSection, HeroStat, HeroVideo};
pub use navigation::{NavItem, NavigationSection};
pub use news::{NewsItem, NewsSection};
pub use portfolio::{PortfolioItem, PortfolioSection, TileSize};
pub use seo::{SeoSection, SeoSettings};
pub use services::{Service, ServicesContent, ServicesSection};
pub use theme::{SiteColors, ThemeSection, VantaSettings};
pub use validate::{MAX_LIST_ITEMS, MAX_TEXT_LENGTH};

/// A document failed its shape rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Required text field is blank.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    /// Text field exceeds the length ceiling.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// List exceeds the item ceiling.
    #[error("list has {len} items (max {max})")]
    TooManyItems { len: usize, max: usize },

    /// List item is missing its id.
    #[error("list item id must not be empty")]
    MissingId,

    /// Two items in one list share an id.
    #[error("duplicate item id {0:?}")]
    DuplicateId(String),

    /// Field value is out of range or badly formatted.
    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// One whole value stored under one settings key.
pub trait Document: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static {
    /// Key this document is stored under.
    const KEY: SettingKey;

    /// Hard-coded value used when nothing valid is stored.
    fn fallback() -> Self;

    /// Check shape rules that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first rule the document breaks.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Element of a list document such as `portfolio_items` or `hero_stats`.
///
/// `Vec<T>` is the stored [`Document`]; it checks the list length, the item
/// ids, and each item's own rules.
pub trait ListItem: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static {
    /// Key the whole list is stored under.
    const KEY: SettingKey;

    /// Items shown before anything is saved.
    fn defaults() -> Vec<Self>;

    /// Editor-generated id, for lists whose items carry one.
    fn item_id(&self) -> Option<&str> {
        None
    }

    /// Check this item's own fields.
    ///
    /// # Errors
    ///
    /// Returns the first rule the item breaks.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl<T: ListItem> Document for Vec<T> {
    const KEY: SettingKey = T::KEY;

    fn fallback() -> Self {
        T::defaults()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate::check_list_len(self.len())?;
        validate::check_unique_ids(self.iter().map(ListItem::item_id))?;
        self.iter().try_for_each(ListItem::validate)
    }
}

/// A document could not be prepared for storage.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The document broke a validation rule.
    #[error("invalid {key}: {source}")]
    Invalid {
        key: SettingKey,
        #[source]
        source: ValidationError,
    },

    /// Serializing to JSON failed.
    #[error("failed to serialize {key}: {source}")]
    Serialize {
        key: SettingKey,
        #[source]
        source: serde_json::Error,
    },
}

/// A stored value could not be turned back into its document.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed {key}: {source}")]
    Malformed {
        key: SettingKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {key}: {source}")]
    Invalid {
        key: SettingKey,
        #[source]
        source: ValidationError,
    },
}

/// Decode and validate one stored value.
///
/// # Errors
///
/// Returns `DecodeError` if the value has the wrong shape or breaks a rule.
pub fn decode<D: Document>(value: &Value) -> Result<D, DecodeError> {
    let doc = D::deserialize(value).map_err(|source| DecodeError::Malformed {
        key: D::KEY,
        source,
    })?;
    doc.validate().map_err(|source| DecodeError::Invalid {
        key: D::KEY,
        source,
    })?;
    Ok(doc)
}

/// Validate a document and serialize it for an upsert.
///
/// # Errors
///
/// Returns `EncodeError` if validation or serialization fails.
pub fn encode<D: Document>(doc: &D) -> Result<(SettingKey, Value), EncodeError> {
    doc.validate().map_err(|source| EncodeError::Invalid {
        key: D::KEY,
        source,
    })?;
    let value = serde_json::to_value(doc).map_err(|source| EncodeError::Serialize {
        key: D::KEY,
        source,
    })?;
    Ok((D::KEY, value))
}

/// Pick `D` out of fetched entries, falling back to its default.
///
/// Absent keys fall back silently; malformed or invalid values are logged.
#[must_use]
pub fn hydrate<D: Document>(entries: &HashMap<SettingKey, Value>) -> D {
    let Some(value) = entries.get(&D::KEY) else {
        return D::fallback();
    };
    match decode(value) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(key = %D::KEY, error = %e, "Stored document rejected, using default");
            D::fallback()
        }
    }
}

/// A content domain: the documents one editor loads and saves together.
///
/// Implemented through [`define_section!`](crate::define_section).
pub trait Section: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static {
    /// Path segment used by editor routes, e.g. `hero`.
    const SLUG: &'static str;
    /// Display name used in the dashboard and the save confirmation.
    const TITLE: &'static str;
    /// One-line summary shown on the dashboard overview.
    const DESCRIPTION: &'static str;
    /// Keys written by one save, in field order.
    const KEYS: &'static [SettingKey];

    /// Every document at its fallback value.
    fn defaults() -> Self;

    /// Hydrate each document independently from fetched entries.
    fn from_entries(entries: &HashMap<SettingKey, Value>) -> Self;

    /// Validate and serialize every document, one entry per key.
    ///
    /// # Errors
    ///
    /// Returns the first document that fails to encode. Nothing is written
    /// when this fails.
    fn to_entries(&self) -> Result<Vec<(SettingKey, Value)>, EncodeError>;

    /// Confirmation shown after a successful save.
    #[must_use]
    fn saved_message() -> String {
        format!("{} saved", Self::TITLE)
    }
}

/// Declare a [`Section`] struct whose fields are [`Document`]s.
///
/// ```rust
/// use brand_mappers_core::define_section;
/// use brand_mappers_core::content::{CtaContent, Section};
///
/// define_section! {
///     /// Call to action only.
///     pub struct Banner {
///         slug: "banner",
///         title: "Banner",
///         description: "Edit the banner",
///         pub content: CtaContent,
///     }
/// }
///
/// assert_eq!(Banner::KEYS.len(), 1);
/// assert_eq!(Banner::saved_message(), "Banner saved");
/// ```
#[macro_export]
macro_rules! define_section {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            slug: $slug:literal,
            title: $title:literal,
            description: $desc:literal,
            $( $(#[$fmeta:meta])* pub $field:ident : $ty:ty ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty ),+
        }

        impl $crate::content::Section for $name {
            const SLUG: &'static str = $slug;
            const TITLE: &'static str = $title;
            const DESCRIPTION: &'static str = $desc;
            const KEYS: &'static [$crate::store::SettingKey] =
                &[ $( <$ty as $crate::content::Document>::KEY ),+ ];

            fn defaults() -> Self {
                Self {
                    $( $field: <$ty as $crate::content::Document>::fallback() ),+
                }
            }

            fn from_entries(
                entries: &::std::collections::HashMap<
                    $crate::store::SettingKey,
                    ::serde_json::Value,
                >,
            ) -> Self {
                Self {
                    $( $field: $crate::content::hydrate::<$ty>(entries) ),+
                }
            }

            fn to_entries(
                &self,
            ) -> ::std::result::Result<
                ::std::vec::Vec<($crate::store::SettingKey, ::serde_json::Value)>,
                $crate::content::EncodeError,
            > {
                Ok(vec![ $( $crate::content::encode(&self.$field)? ),+ ])
            }
        }
    };
}
