//! Database models for reviews.

use crate::types::{ReviewId, TitleId, UserId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a review
#[derive(Debug, Clone)]
pub struct ReviewCreateDBRequest {
    pub title_id: TitleId,
    pub author_id: UserId,
    pub text: String,
    pub score: i64,
}

/// Database request for updating a review. The author and publication date
/// are immutable.
#[derive(Debug, Clone, Default)]
pub struct ReviewUpdateDBRequest {
    pub text: Option<String>,
    pub score: Option<i64>,
}

/// Database response for a review
#[derive(Debug, Clone, FromRow)]
pub struct ReviewDBResponse {
    pub id: ReviewId,
    pub title_id: TitleId,
    pub author_id: UserId,
    pub author_username: String,
    pub text: String,
    pub score: i64,
    pub pub_date: DateTime<Utc>,
}
