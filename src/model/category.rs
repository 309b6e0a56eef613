//! A browsable product category.
//!
//! Categories are written only from the admin console; the storefront reads them and
//! routes by `slug`.

use crate::icons::CategoryIcon;
use serde::{Deserialize, Serialize};

super::record_id!(
    /// Type-safe identifier for Categories.
    CategoryId,
    "category"
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Unique, used as the route key of the category page.
    pub slug: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub icon: CategoryIcon,
    /// Set while the category is being deleted; no product may join it.
    #[serde(default)]
    pub retired: bool,
}

impl Category {
    pub fn new(
        id: CategoryId,
        name: impl Into<String>,
        slug: impl Into<String>,
        icon: CategoryIcon,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            image_url: None,
            icon,
            retired: false,
        }
    }
}

/// Payload for creating a category.
#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub icon: CategoryIcon,
}

/// Payload for updating a category. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub image_url: Option<String>,
    pub icon: Option<CategoryIcon>,
}

/// Selects categories in a `List` request.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryFilter {
    Slug(String),
}

/// Slugs are non-empty, lowercase ASCII letters, digits and single inner hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_rules() {
        assert!(is_valid_slug("fruits"));
        assert!(is_valid_slug("fresh-juice-2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Fruits"));
        assert!(!is_valid_slug("-dairy"));
        assert!(!is_valid_slug("dairy--eggs"));
        assert!(!is_valid_slug("tea & coffee"));
    }

    #[test]
    fn test_category_row_decodes_from_backend_json() {
        let row = r#"{"id":1,"name":"Fruits","slug":"fruits","image_url":null,"icon":"fruits"}"#;
        let category: Category = serde_json::from_str(row).unwrap();
        assert_eq!(category.id, CategoryId(1));
        assert_eq!(category.icon, CategoryIcon::Fruits);
        assert!(category.image_url.is_none());
    }
}
