//! Content hierarchy helpers: study page slugs and entity names.
//!
//! The hierarchy is StudyPage -> Category -> Card -> DetailPage, with
//! dynamic tables hanging off detail pages.

use crate::error::CoreError;

pub const ENTITY_STUDY_PAGE: &str = "StudyPage";
pub const ENTITY_CATEGORY: &str = "Category";
pub const ENTITY_CARD: &str = "Card";
pub const ENTITY_DETAIL_PAGE: &str = "DetailPage";
pub const ENTITY_DYNAMIC_TABLE: &str = "DynamicTable";

/// Maximum slug length accepted for study pages.
pub const MAX_SLUG_LEN: usize = 120;

/// Generate a URL-safe slug from a page title.
///
/// Lowercases, maps every non-alphanumeric character to a hyphen, collapses
/// runs of hyphens and trims them from both ends.
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_hyphen = true;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug.truncate(MAX_SLUG_LEN);
    slug
}

/// Validate a slug: non-empty, lowercase ASCII alphanumerics and hyphens only.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_SLUG_LEN} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}
