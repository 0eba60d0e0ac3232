//! API request/response models for reviews.

use crate::db::models::reviews::ReviewDBResponse;
use crate::errors::Error;
use crate::types::ReviewId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MIN_SCORE: i64 = 1;
pub const MAX_SCORE: i64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewCreate {
    pub text: String,
    /// Score in [1, 10]
    pub score: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ReviewUpdate {
    pub text: Option<String>,
    pub score: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ReviewId,
    pub text: String,
    /// Username of the review author; always set server-side
    pub author: String,
    pub score: i64,
    pub pub_date: DateTime<Utc>,
}

impl From<ReviewDBResponse> for ReviewResponse {
    fn from(db: ReviewDBResponse) -> Self {
        Self {
            id: db.id,
            text: db.text,
            author: db.author_username,
            score: db.score,
            pub_date: db.pub_date,
        }
    }
}

pub fn validate_score(score: i64) -> Result<(), Error> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(Error::Validation {
            field: "score".to_string(),
            message: format!("Score must be between {MIN_SCORE} and {MAX_SCORE}"),
        });
    }
    Ok(())
}
