//! API request/response models for genres.

use crate::db::models::genres::GenreDBResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenreCreate {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenreResponse {
    pub name: String,
    pub slug: String,
}

impl From<GenreDBResponse> for GenreResponse {
    fn from(db: GenreDBResponse) -> Self {
        Self {
            name: db.name,
            slug: db.slug,
        }
    }
}
