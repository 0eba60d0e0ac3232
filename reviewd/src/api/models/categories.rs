//! API request/response models for categories, plus slug validation shared
//! with genres.

use super::pagination::Pagination;
use crate::db::models::categories::CategoryDBResponse;
use crate::errors::Error;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

const MAX_SLUG_LEN: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryCreate {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub name: String,
    pub slug: String,
}

impl From<CategoryDBResponse> for CategoryResponse {
    fn from(db: CategoryDBResponse) -> Self {
        Self {
            name: db.name,
            slug: db.slug,
        }
    }
}

/// Query parameters for listing categories or genres
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListSlugQuery {
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Filter by name (case-insensitive substring match)
    pub search: Option<String>,
}

/// Validate a URL-safe slug.
pub fn validate_slug(slug: &str) -> Result<(), Error> {
    if slug.is_empty() || slug.len() > MAX_SLUG_LEN {
        return Err(Error::Validation {
            field: "slug".to_string(),
            message: format!("Slug must be between 1 and {MAX_SLUG_LEN} characters"),
        });
    }
    if !slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(Error::Validation {
            field: "slug".to_string(),
            message: "Slug may only contain lowercase letters, digits and '-'".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_validation() {
        assert!(validate_slug("film-noir").is_ok());
        assert!(validate_slug("films2").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Capitalized").is_err());
        assert!(validate_slug("under_score").is_err());
        assert!(validate_slug(&"s".repeat(51)).is_err());
    }
}
