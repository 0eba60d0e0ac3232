//! Database repository for reviews.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::reviews::{ReviewCreateDBRequest, ReviewDBResponse, ReviewUpdateDBRequest},
};
use crate::types::{abbrev_uuid, ReviewId, TitleId, UserId};
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing reviews, always scoped to a parent title.
#[derive(Debug, Clone)]
pub struct ReviewFilter {
    pub title_id: TitleId,
    pub skip: i64,
    pub limit: i64,
}

const SELECT_REVIEW: &str = r#"
    SELECT r.id, r.title_id, r.author_id, u.username AS author_username, r.text, r.score, r.pub_date
    FROM reviews r
    JOIN users u ON u.id = r.author_id
"#;

pub struct Reviews<'c> {
    db: &'c mut SqliteConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Reviews<'c> {
    type CreateRequest = ReviewCreateDBRequest;
    type UpdateRequest = ReviewUpdateDBRequest;
    type Response = ReviewDBResponse;
    type Id = ReviewId;
    type Filter = ReviewFilter;

    #[instrument(skip(self, request), fields(title_id = %abbrev_uuid(&request.title_id), author_id = %abbrev_uuid(&request.author_id)), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let review_id = Uuid::new_v4();

        // The composite (title_id, author_id) constraint arbitrates racing
        // duplicate inserts here, whatever checks ran before this point.
        sqlx::query("INSERT INTO reviews (id, title_id, author_id, text, score, pub_date) VALUES (?, ?, ?, ?, ?, ?)")
            .bind(review_id)
            .bind(request.title_id)
            .bind(request.author_id)
            .bind(&request.text)
            .bind(request.score)
            .bind(Utc::now())
            .execute(&mut *self.db)
            .await?;

        self.get_by_id(review_id).await?.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(review_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let review = sqlx::query_as::<_, ReviewDBResponse>(&format!("{SELECT_REVIEW} WHERE r.id = ?"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(review)
    }

    #[instrument(skip(self, filter), fields(title_id = %abbrev_uuid(&filter.title_id)), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let reviews = sqlx::query_as::<_, ReviewDBResponse>(&format!(
            "{SELECT_REVIEW} WHERE r.title_id = ? ORDER BY r.pub_date DESC, r.id LIMIT ? OFFSET ?"
        ))
        .bind(filter.title_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(reviews)
    }

    #[instrument(skip(self), fields(review_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(review_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        // Author and pub_date are immutable
        let result = sqlx::query("UPDATE reviews SET text = COALESCE(?, text), score = COALESCE(?, score) WHERE id = ?")
            .bind(&request.text)
            .bind(request.score)
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        self.get_by_id(id).await?.ok_or(DbError::NotFound)
    }
}

impl<'c> Reviews<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Whether the author has already reviewed the title. The user-facing
    /// duplicate check runs against this before inserting.
    #[instrument(skip(self), fields(title_id = %abbrev_uuid(&title_id), author_id = %abbrev_uuid(&author_id)), err)]
    pub async fn exists_for(&mut self, title_id: TitleId, author_id: UserId) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM reviews WHERE title_id = ? AND author_id = ?)")
            .bind(title_id)
            .bind(author_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::users::Role;
    use crate::db::handlers::{Titles, Users};
    use crate::db::models::{titles::TitleCreateDBRequest, users::UserCreateDBRequest};
    use sqlx::SqlitePool;

    async fn seed(conn: &mut SqliteConnection) -> (TitleId, UserId) {
        let user = Users::new(conn)
            .create(&UserCreateDBRequest {
                username: "critic".to_string(),
                email: "critic@example.com".to_string(),
                first_name: None,
                last_name: None,
                bio: None,
                role: Role::User,
                is_superuser: false,
                confirmation_code: None,
            })
            .await
            .unwrap();

        let title = Titles::new(conn)
            .create(&TitleCreateDBRequest {
                name: "Ran".to_string(),
                year: 1985,
                description: None,
                category_id: None,
                genre_ids: vec![],
            })
            .await
            .unwrap();

        (title.id, user.id)
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_fetch(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let (title_id, author_id) = seed(&mut conn).await;

        let mut repo = Reviews::new(&mut conn);
        let review = repo
            .create(&ReviewCreateDBRequest {
                title_id,
                author_id,
                text: "Towering".to_string(),
                score: 10,
            })
            .await
            .unwrap();

        assert_eq!(review.author_username, "critic");
        assert_eq!(review.score, 10);

        let listed = repo
            .list(&ReviewFilter {
                title_id,
                skip: 0,
                limit: 100,
            })
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, review.id);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_duplicate_review_hits_composite_constraint(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let (title_id, author_id) = seed(&mut conn).await;

        let mut repo = Reviews::new(&mut conn);
        repo.create(&ReviewCreateDBRequest {
            title_id,
            author_id,
            text: "first".to_string(),
            score: 5,
        })
        .await
        .unwrap();

        assert!(repo.exists_for(title_id, author_id).await.unwrap());

        let err = repo
            .create(&ReviewCreateDBRequest {
                title_id,
                author_id,
                text: "second".to_string(),
                score: 6,
            })
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { constraint, .. } => {
                assert_eq!(constraint.as_deref(), Some("reviews.title_id, reviews.author_id"));
            }
            other => panic!("expected unique violation, got {other:?}"),
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_keeps_author_and_pub_date(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let (title_id, author_id) = seed(&mut conn).await;

        let mut repo = Reviews::new(&mut conn);
        let review = repo
            .create(&ReviewCreateDBRequest {
                title_id,
                author_id,
                text: "draft".to_string(),
                score: 5,
            })
            .await
            .unwrap();

        let updated = repo
            .update(
                review.id,
                &ReviewUpdateDBRequest {
                    text: Some("final".to_string()),
                    score: Some(8),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.text, "final");
        assert_eq!(updated.score, 8);
        assert_eq!(updated.author_id, review.author_id);
        assert_eq!(updated.pub_date, review.pub_date);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_title_delete_cascades(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let (title_id, author_id) = seed(&mut conn).await;

        let review = Reviews::new(&mut conn)
            .create(&ReviewCreateDBRequest {
                title_id,
                author_id,
                text: "gone soon".to_string(),
                score: 7,
            })
            .await
            .unwrap();

        assert!(Titles::new(&mut conn).delete(title_id).await.unwrap());
        assert!(Reviews::new(&mut conn).get_by_id(review.id).await.unwrap().is_none());
    }
}
