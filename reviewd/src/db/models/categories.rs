//! Database models for categories.

use crate::api::models::categories::CategoryCreate;
use crate::types::CategoryId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a category
#[derive(Debug, Clone)]
pub struct CategoryCreateDBRequest {
    pub slug: String,
    pub name: String,
}

impl From<CategoryCreate> for CategoryCreateDBRequest {
    fn from(api: CategoryCreate) -> Self {
        Self {
            slug: api.slug,
            name: api.name,
        }
    }
}

/// Database response for a category
#[derive(Debug, Clone, FromRow)]
pub struct CategoryDBResponse {
    pub id: CategoryId,
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
