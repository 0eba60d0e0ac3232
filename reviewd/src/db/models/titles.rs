//! Database models for catalog titles.

use crate::db::models::{categories::CategoryDBResponse, genres::GenreDBResponse};
use crate::types::{CategoryId, GenreId, TitleId};
use chrono::{DateTime, Utc};

/// Database request for creating a title.
///
/// Slug-to-id resolution happens before this request is built; repositories
/// only deal in ids.
#[derive(Debug, Clone)]
pub struct TitleCreateDBRequest {
    pub name: String,
    pub year: i64,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub genre_ids: Vec<GenreId>,
}

/// Database request for updating a title
#[derive(Debug, Clone, Default)]
pub struct TitleUpdateDBRequest {
    pub name: Option<String>,
    pub year: Option<i64>,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub genre_ids: Option<Vec<GenreId>>,
}

/// Database response for a title, with its relations and derived rating
/// already resolved.
#[derive(Debug, Clone)]
pub struct TitleDBResponse {
    pub id: TitleId,
    pub name: String,
    pub year: i64,
    pub description: Option<String>,
    pub category: Option<CategoryDBResponse>,
    pub genres: Vec<GenreDBResponse>,
    /// Mean review score; `None` when the title has no reviews
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
}
