//! Database models for comments.

use crate::types::{CommentId, ReviewId, UserId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a comment
#[derive(Debug, Clone)]
pub struct CommentCreateDBRequest {
    pub review_id: ReviewId,
    pub author_id: UserId,
    pub text: String,
}

/// Database request for updating a comment
#[derive(Debug, Clone, Default)]
pub struct CommentUpdateDBRequest {
    pub text: Option<String>,
}

/// Database response for a comment
#[derive(Debug, Clone, FromRow)]
pub struct CommentDBResponse {
    pub id: CommentId,
    pub review_id: ReviewId,
    pub author_id: UserId,
    pub author_username: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}
