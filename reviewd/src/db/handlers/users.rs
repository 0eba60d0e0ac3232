//! Database repository for users.

use crate::types::{abbrev_uuid, UserId};
use crate::{
    api::models::users::Role,
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::users::{UserCreateDBRequest, UserDBResponse, UserUpdateDBRequest},
    },
};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection};
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing users
#[derive(Debug, Clone)]
pub struct UserFilter {
    /// Case-insensitive substring match on username
    pub search: Option<String>,
    pub skip: i64,
    pub limit: i64,
}

impl UserFilter {
    pub fn new(search: Option<String>, skip: i64, limit: i64) -> Self {
        Self { search, skip, limit }
    }
}

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct UserRow {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Role,
    pub is_superuser: bool,
    pub confirmation_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserDBResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            bio: row.bio,
            role: row.role,
            is_superuser: row.is_superuser,
            confirmation_code: row.confirmation_code,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct Users<'c> {
    db: &'c mut SqliteConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Users<'c> {
    type CreateRequest = UserCreateDBRequest;
    type UpdateRequest = UserUpdateDBRequest;
    type Response = UserDBResponse;
    type Id = UserId;
    type Filter = UserFilter;

    #[instrument(skip(self, request), fields(username = %request.username), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        // Always generate a new ID for users
        let user_id = Uuid::new_v4();
        let now = Utc::now();

        let user = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, email, first_name, last_name, bio, role, is_superuser, confirmation_code, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&request.username)
        .bind(&request.email)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.bio)
        .bind(&request.role)
        .bind(request.is_superuser)
        .bind(&request.confirmation_code)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(UserDBResponse::from(user))
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(user.map(UserDBResponse::from))
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let users = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT * FROM users
            WHERE (? IS NULL OR instr(lower(username), lower(?)) > 0)
            ORDER BY created_at, username
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(&filter.search)
        .bind(&filter.search)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(users.into_iter().map(UserDBResponse::from).collect())
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users SET
                username = COALESCE(?, username),
                email = COALESCE(?, email),
                first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                bio = COALESCE(?, bio),
                role = COALESCE(?, role),
                confirmation_code = COALESCE(?, confirmation_code),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&request.username)
        .bind(&request.email)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.bio)
        .bind(&request.role)
        .bind(&request.confirmation_code)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(UserDBResponse::from(user))
    }
}

impl<'c> Users<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, username), err)]
    pub async fn get_by_username(&mut self, username: &str) -> Result<Option<UserDBResponse>> {
        let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(user.map(UserDBResponse::from))
    }

    #[instrument(skip(self, email), err)]
    pub async fn get_by_email(&mut self, email: &str) -> Result<Option<UserDBResponse>> {
        let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(user.map(UserDBResponse::from))
    }

    /// Store a freshly generated confirmation code, replacing any prior one.
    #[instrument(skip(self, code), fields(user_id = %abbrev_uuid(&id)), err)]
    pub async fn set_confirmation_code(&mut self, id: UserId, code: &str) -> Result<()> {
        let result = sqlx::query("UPDATE users SET confirmation_code = ?, updated_at = ? WHERE id = ?")
            .bind(code)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::repository::Repository;
    use super::*;
    use sqlx::SqlitePool;

    fn create_request(username: &str, email: &str, role: Role) -> UserCreateDBRequest {
        UserCreateDBRequest {
            username: username.to_string(),
            email: email.to_string(),
            first_name: None,
            last_name: None,
            bio: None,
            role,
            is_superuser: false,
            confirmation_code: None,
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_fetch_user(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        let created = repo
            .create(&create_request("capote", "capote@example.com", Role::User))
            .await
            .unwrap();
        assert_eq!(created.username, "capote");
        assert_eq!(created.role, Role::User);
        assert!(!created.is_superuser);

        let by_username = repo.get_by_username("capote").await.unwrap().unwrap();
        assert_eq!(by_username.id, created.id);

        let by_email = repo.get_by_email("capote@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        let by_id = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "capote");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_duplicate_email_is_unique_violation(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        repo.create(&create_request("first", "dup@example.com", Role::User))
            .await
            .unwrap();
        let err = repo
            .create(&create_request("second", "dup@example.com", Role::User))
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { constraint, .. } => {
                assert_eq!(constraint.as_deref(), Some("users.email"));
            }
            other => panic!("expected unique violation, got {other:?}"),
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_role_and_profile(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        let created = repo
            .create(&create_request("promotee", "promotee@example.com", Role::User))
            .await
            .unwrap();

        let updated = repo
            .update(
                created.id,
                &UserUpdateDBRequest {
                    bio: Some("writes about films".to_string()),
                    role: Some(Role::Moderator),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.role, Role::Moderator);
        assert_eq!(updated.bio.as_deref(), Some("writes about films"));
        // Untouched fields survive the partial update
        assert_eq!(updated.username, "promotee");
        assert_eq!(updated.email, "promotee@example.com");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_confirmation_code_replacement(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        let created = repo
            .create(&create_request("coded", "coded@example.com", Role::User))
            .await
            .unwrap();
        assert!(created.confirmation_code.is_none());

        repo.set_confirmation_code(created.id, "first-code").await.unwrap();
        repo.set_confirmation_code(created.id, "second-code").await.unwrap();

        let user = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(user.confirmation_code.as_deref(), Some("second-code"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_with_search(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        for name in ["alpha", "beta", "alphabet"] {
            repo.create(&create_request(name, &format!("{name}@example.com"), Role::User))
                .await
                .unwrap();
        }

        let all = repo.list(&UserFilter::new(None, 0, 100)).await.unwrap();
        assert_eq!(all.len(), 3);

        let matched = repo
            .list(&UserFilter::new(Some("ALPHA".to_string()), 0, 100))
            .await
            .unwrap();
        let names: Vec<_> = matched.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["alpha", "alphabet"]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_user(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);

        let created = repo
            .create(&create_request("ephemeral", "ephemeral@example.com", Role::User))
            .await
            .unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }
}
