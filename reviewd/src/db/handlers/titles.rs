//! Database repository for catalog titles.
//!
//! Titles carry two relations (an optional category and a genre set) and a
//! derived rating, so reads assemble the full [`TitleDBResponse`] rather than
//! returning bare rows. The rating is always computed by aggregation over
//! reviews, never stored.

use crate::types::{abbrev_uuid, CategoryId, TitleId};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::{
        categories::CategoryDBResponse,
        genres::GenreDBResponse,
        titles::{TitleCreateDBRequest, TitleDBResponse, TitleUpdateDBRequest},
    },
};
use chrono::{DateTime, Utc};
use sqlx::{Connection, FromRow, QueryBuilder, Sqlite, SqliteConnection};
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing titles. Category and genre are matched by slug, name
/// by case-insensitive substring, year exactly.
#[derive(Debug, Clone, Default)]
pub struct TitleFilter {
    pub category: Option<String>,
    pub genre: Option<String>,
    pub name: Option<String>,
    pub year: Option<i64>,
    pub skip: i64,
    pub limit: i64,
}

// Database entity model; rating is attached by the enclosing queries
#[derive(Debug, Clone, FromRow)]
struct TitleRow {
    pub id: TitleId,
    pub name: String,
    pub year: i64,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub rating: Option<f64>,
}

pub struct Titles<'c> {
    db: &'c mut SqliteConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Titles<'c> {
    type CreateRequest = TitleCreateDBRequest;
    type UpdateRequest = TitleUpdateDBRequest;
    type Response = TitleDBResponse;
    type Id = TitleId;
    type Filter = TitleFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let title_id = Uuid::new_v4();

        // Title row and genre links must land together
        let mut tx = self.db.begin().await?;

        sqlx::query("INSERT INTO titles (id, name, year, description, category_id, created_at) VALUES (?, ?, ?, ?, ?, ?)")
            .bind(title_id)
            .bind(&request.name)
            .bind(request.year)
            .bind(&request.description)
            .bind(request.category_id)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

        for genre_id in &request.genre_ids {
            sqlx::query("INSERT INTO title_genres (title_id, genre_id) VALUES (?, ?)")
                .bind(title_id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.get_by_id(title_id).await?.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(title_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let row = sqlx::query_as::<_, TitleRow>(
            r#"
            SELECT t.*, (SELECT AVG(r.score) FROM reviews r WHERE r.title_id = t.id) AS rating
            FROM titles t
            WHERE t.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        match row {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            SELECT t.*, (SELECT AVG(r.score) FROM reviews r WHERE r.title_id = t.id) AS rating
            FROM titles t
            WHERE 1 = 1
            "#,
        );

        if let Some(category) = &filter.category {
            qb.push(" AND t.category_id IN (SELECT c.id FROM categories c WHERE c.slug = ")
                .push_bind(category.clone())
                .push(")");
        }
        if let Some(genre) = &filter.genre {
            qb.push(
                " AND t.id IN (SELECT tg.title_id FROM title_genres tg \
                 JOIN genres g ON g.id = tg.genre_id WHERE g.slug = ",
            )
            .push_bind(genre.clone())
            .push(")");
        }
        if let Some(name) = &filter.name {
            qb.push(" AND instr(lower(t.name), lower(").push_bind(name.clone()).push(")) > 0");
        }
        if let Some(year) = filter.year {
            qb.push(" AND t.year = ").push_bind(year);
        }

        qb.push(" ORDER BY t.created_at, t.id LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.skip);

        let rows: Vec<TitleRow> = qb.build_query_as().fetch_all(&mut *self.db).await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            result.push(self.assemble(row).await?);
        }
        Ok(result)
    }

    #[instrument(skip(self), fields(title_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM titles WHERE id = ?")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(title_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        {
            let mut tx = self.db.begin().await?;

            let result = sqlx::query(
                r#"
                UPDATE titles SET
                    name = COALESCE(?, name),
                    year = COALESCE(?, year),
                    description = COALESCE(?, description),
                    category_id = COALESCE(?, category_id)
                WHERE id = ?
                "#,
            )
            .bind(&request.name)
            .bind(request.year)
            .bind(&request.description)
            .bind(request.category_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(DbError::NotFound);
            }

            // A supplied genre set replaces the previous one wholesale
            if let Some(genre_ids) = &request.genre_ids {
                sqlx::query("DELETE FROM title_genres WHERE title_id = ?")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;

                for genre_id in genre_ids {
                    sqlx::query("INSERT INTO title_genres (title_id, genre_id) VALUES (?, ?)")
                        .bind(id)
                        .bind(genre_id)
                        .execute(&mut *tx)
                        .await?;
                }
            }

            tx.commit().await?;
        }

        self.get_by_id(id).await?.ok_or(DbError::NotFound)
    }
}

impl<'c> Titles<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Resolve the category and genre relations for a fetched row.
    async fn assemble(&mut self, row: TitleRow) -> Result<TitleDBResponse> {
        let category = match row.category_id {
            Some(category_id) => {
                sqlx::query_as::<_, CategoryDBResponse>("SELECT * FROM categories WHERE id = ?")
                    .bind(category_id)
                    .fetch_optional(&mut *self.db)
                    .await?
            }
            None => None,
        };

        let genres = sqlx::query_as::<_, GenreDBResponse>(
            r#"
            SELECT g.* FROM genres g
            JOIN title_genres tg ON tg.genre_id = g.id
            WHERE tg.title_id = ?
            ORDER BY g.created_at, g.slug
            "#,
        )
        .bind(row.id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(TitleDBResponse {
            id: row.id,
            name: row.name,
            year: row.year,
            description: row.description,
            category,
            genres,
            rating: row.rating,
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::users::Role;
    use crate::db::handlers::{Categories, Genres, Reviews, Users};
    use crate::db::models::{
        categories::CategoryCreateDBRequest,
        genres::GenreCreateDBRequest,
        reviews::ReviewCreateDBRequest,
        users::UserCreateDBRequest,
    };
    use sqlx::SqlitePool;

    async fn seed_category(conn: &mut SqliteConnection, slug: &str) -> CategoryDBResponse {
        Categories::new(conn)
            .create(&CategoryCreateDBRequest {
                slug: slug.to_string(),
                name: slug.to_string(),
            })
            .await
            .unwrap()
    }

    async fn seed_genre(conn: &mut SqliteConnection, slug: &str) -> GenreDBResponse {
        Genres::new(conn)
            .create(&GenreCreateDBRequest {
                slug: slug.to_string(),
                name: slug.to_string(),
            })
            .await
            .unwrap()
    }

    async fn seed_user(conn: &mut SqliteConnection, username: &str) -> crate::db::models::users::UserDBResponse {
        Users::new(conn)
            .create(&UserCreateDBRequest {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                first_name: None,
                last_name: None,
                bio: None,
                role: Role::User,
                is_superuser: false,
                confirmation_code: None,
            })
            .await
            .unwrap()
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_with_relations(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let category = seed_category(&mut conn, "films").await;
        let noir = seed_genre(&mut conn, "noir").await;
        let drama = seed_genre(&mut conn, "drama").await;

        let mut repo = Titles::new(&mut conn);
        let title = repo
            .create(&TitleCreateDBRequest {
                name: "The Third Man".to_string(),
                year: 1949,
                description: Some("Post-war Vienna".to_string()),
                category_id: Some(category.id),
                genre_ids: vec![noir.id, drama.id],
            })
            .await
            .unwrap();

        assert_eq!(title.name, "The Third Man");
        assert_eq!(title.category.as_ref().unwrap().slug, "films");
        assert_eq!(title.genres.len(), 2);
        assert_eq!(title.rating, None);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_rating_is_mean_of_scores(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let reviewer_a = seed_user(&mut conn, "reviewer-a").await;
        let reviewer_b = seed_user(&mut conn, "reviewer-b").await;

        let mut repo = Titles::new(&mut conn);
        let title = repo
            .create(&TitleCreateDBRequest {
                name: "Solaris".to_string(),
                year: 1972,
                description: None,
                category_id: None,
                genre_ids: vec![],
            })
            .await
            .unwrap();

        for (author, score) in [(reviewer_a.id, 7), (reviewer_b.id, 10)] {
            Reviews::new(&mut conn)
                .create(&ReviewCreateDBRequest {
                    title_id: title.id,
                    author_id: author,
                    text: "Seen it twice".to_string(),
                    score,
                })
                .await
                .unwrap();
        }

        let title = Titles::new(&mut conn).get_by_id(title.id).await.unwrap().unwrap();
        assert_eq!(title.rating, Some(8.5));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_filters(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let films = seed_category(&mut conn, "films").await;
        let books = seed_category(&mut conn, "books").await;
        let noir = seed_genre(&mut conn, "noir").await;

        let mut repo = Titles::new(&mut conn);
        repo.create(&TitleCreateDBRequest {
            name: "The Big Sleep".to_string(),
            year: 1946,
            description: None,
            category_id: Some(films.id),
            genre_ids: vec![noir.id],
        })
        .await
        .unwrap();
        repo.create(&TitleCreateDBRequest {
            name: "The Big Sleep".to_string(),
            year: 1939,
            description: None,
            category_id: Some(books.id),
            genre_ids: vec![],
        })
        .await
        .unwrap();
        repo.create(&TitleCreateDBRequest {
            name: "Stalker".to_string(),
            year: 1979,
            description: None,
            category_id: Some(films.id),
            genre_ids: vec![],
        })
        .await
        .unwrap();

        let base = TitleFilter {
            skip: 0,
            limit: 100,
            ..Default::default()
        };

        let by_category = repo
            .list(&TitleFilter {
                category: Some("films".to_string()),
                ..base.clone()
            })
            .await
            .unwrap();
        assert_eq!(by_category.len(), 2);

        let by_genre = repo
            .list(&TitleFilter {
                genre: Some("noir".to_string()),
                ..base.clone()
            })
            .await
            .unwrap();
        assert_eq!(by_genre.len(), 1);
        assert_eq!(by_genre[0].year, 1946);

        let by_name = repo
            .list(&TitleFilter {
                name: Some("big sleep".to_string()),
                ..base.clone()
            })
            .await
            .unwrap();
        assert_eq!(by_name.len(), 2);

        let combined = repo
            .list(&TitleFilter {
                name: Some("big".to_string()),
                year: Some(1939),
                ..base.clone()
            })
            .await
            .unwrap();
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].category.as_ref().unwrap().slug, "books");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_category_delete_clears_reference(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let category = seed_category(&mut conn, "films").await;

        let mut repo = Titles::new(&mut conn);
        let title = repo
            .create(&TitleCreateDBRequest {
                name: "Playtime".to_string(),
                year: 1967,
                description: None,
                category_id: Some(category.id),
                genre_ids: vec![],
            })
            .await
            .unwrap();
        assert!(title.category.is_some());

        assert!(Categories::new(&mut conn).delete_by_slug("films").await.unwrap());

        let title = Titles::new(&mut conn).get_by_id(title.id).await.unwrap().unwrap();
        assert!(title.category.is_none(), "title must survive with category cleared");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_replaces_genres(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let noir = seed_genre(&mut conn, "noir").await;
        let comedy = seed_genre(&mut conn, "comedy").await;

        let mut repo = Titles::new(&mut conn);
        let title = repo
            .create(&TitleCreateDBRequest {
                name: "Charade".to_string(),
                year: 1963,
                description: None,
                category_id: None,
                genre_ids: vec![noir.id],
            })
            .await
            .unwrap();

        let updated = repo
            .update(
                title.id,
                &TitleUpdateDBRequest {
                    year: Some(1964),
                    genre_ids: Some(vec![comedy.id]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.year, 1964);
        assert_eq!(updated.name, "Charade");
        let slugs: Vec<_> = updated.genres.iter().map(|g| g.slug.as_str()).collect();
        assert_eq!(slugs, vec!["comedy"]);
    }
}
