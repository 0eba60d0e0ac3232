//! API request/response models for catalog titles.
//!
//! Titles have two serializer shapes, chosen by method: reads embed the full
//! category/genre objects plus the derived rating, writes take slugs.

use super::categories::CategoryResponse;
use super::genres::GenreResponse;
use super::pagination::Pagination;
use crate::db::models::titles::TitleDBResponse;
use crate::errors::Error;
use crate::types::TitleId;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use utoipa::{IntoParams, ToSchema};

/// Write shape: relations are referenced by slug.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TitleCreate {
    pub name: String,
    pub year: i64,
    pub description: Option<String>,
    /// Genre slugs; unknown slugs are rejected
    #[serde(default)]
    pub genre: Vec<String>,
    /// Category slug; unknown slugs are rejected
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TitleUpdate {
    pub name: Option<String>,
    pub year: Option<i64>,
    pub description: Option<String>,
    pub genre: Option<Vec<String>>,
    pub category: Option<String>,
}

/// Read shape: relations embedded, rating derived.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TitleResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: TitleId,
    pub name: String,
    pub year: i64,
    /// Mean review score, absent while the title has no reviews
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub genre: Vec<GenreResponse>,
    pub category: Option<CategoryResponse>,
}

impl From<TitleDBResponse> for TitleResponse {
    fn from(db: TitleDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            year: db.year,
            rating: db.rating,
            description: db.description,
            genre: db.genres.into_iter().map(GenreResponse::from).collect(),
            category: db.category.map(CategoryResponse::from),
        }
    }
}

/// Query parameters for listing titles
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListTitlesQuery {
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Filter by category slug
    pub category: Option<String>,
    /// Filter by genre slug
    pub genre: Option<String>,
    /// Filter by name (case-insensitive substring match)
    pub name: Option<String>,
    /// Filter by exact year
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub year: Option<i64>,
}

/// A title's year cannot lie in the future.
pub fn validate_year(year: i64) -> Result<(), Error> {
    let current_year = i64::from(chrono::Utc::now().year());
    if year > current_year {
        return Err(Error::Validation {
            field: "year".to_string(),
            message: format!("Year must not be greater than {current_year}"),
        });
    }
    Ok(())
}
