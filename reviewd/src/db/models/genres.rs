//! Database models for genres.

use crate::api::models::genres::GenreCreate;
use crate::types::GenreId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a genre
#[derive(Debug, Clone)]
pub struct GenreCreateDBRequest {
    pub slug: String,
    pub name: String,
}

impl From<GenreCreate> for GenreCreateDBRequest {
    fn from(api: GenreCreate) -> Self {
        Self {
            slug: api.slug,
            name: api.name,
        }
    }
}

/// Database response for a genre
#[derive(Debug, Clone, FromRow)]
pub struct GenreDBResponse {
    pub id: GenreId,
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
