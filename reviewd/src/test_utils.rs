//! Test utilities for integration testing (available with `test-utils` feature).

use crate::api::models::users::Role;
use crate::auth::token;
use crate::config::{Config, EmailTransportConfig};
use crate::db::handlers::{Categories, Genres, Repository, Reviews, Titles, Users};
use crate::db::models::{
    categories::{CategoryCreateDBRequest, CategoryDBResponse},
    genres::{GenreCreateDBRequest, GenreDBResponse},
    reviews::{ReviewCreateDBRequest, ReviewDBResponse},
    titles::{TitleCreateDBRequest, TitleDBResponse},
    users::{UserCreateDBRequest, UserDBResponse},
};
use crate::types::{TitleId, UserId};
use axum_test::TestServer;
use sqlx::SqlitePool;
use uuid::Uuid;

pub fn create_test_config() -> Config {
    // Use temp directory for test emails
    let temp_dir = std::env::temp_dir().join(format!("reviewd-test-emails-{}", std::process::id()));

    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        email: crate::config::EmailConfig {
            transport: EmailTransportConfig::File {
                path: temp_dir.to_string_lossy().to_string(),
            },
            ..Default::default()
        },
        ..Default::default()
    }
}

pub async fn create_test_app_state(pool: SqlitePool, config: Config) -> crate::AppState {
    crate::AppState::builder().db(pool).config(config).build()
}

/// Build a test server around the full router, including the bootstrap
/// admin user.
pub async fn create_test_app(pool: SqlitePool) -> TestServer {
    let config = create_test_config();

    let app = crate::Application::new_with_pool(config, Some(pool))
        .await
        .expect("Failed to create application");

    app.into_test_server()
}

pub async fn create_test_user(pool: &SqlitePool, role: Role) -> UserDBResponse {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("user-{}", &suffix[..12]);

    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    Users::new(&mut conn)
        .create(&UserCreateDBRequest {
            username: username.clone(),
            email: format!("{username}@example.com"),
            first_name: None,
            last_name: None,
            bio: None,
            role,
            is_superuser: false,
            confirmation_code: None,
        })
        .await
        .expect("Failed to create test user")
}

/// Mint a bearer token for a user, the way the token-exchange endpoint would.
pub fn bearer_token_for(user_id: UserId, username: &str, config: &Config) -> String {
    token::create_access_token(user_id, username, config).expect("Failed to create test token")
}

pub async fn create_test_category(pool: &SqlitePool, slug: &str) -> CategoryDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    Categories::new(&mut conn)
        .create(&CategoryCreateDBRequest {
            slug: slug.to_string(),
            name: slug.to_string(),
        })
        .await
        .expect("Failed to create test category")
}

pub async fn create_test_genre(pool: &SqlitePool, slug: &str) -> GenreDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    Genres::new(&mut conn)
        .create(&GenreCreateDBRequest {
            slug: slug.to_string(),
            name: slug.to_string(),
        })
        .await
        .expect("Failed to create test genre")
}

pub async fn create_test_title(pool: &SqlitePool, name: &str, year: i64) -> TitleDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    Titles::new(&mut conn)
        .create(&TitleCreateDBRequest {
            name: name.to_string(),
            year,
            description: None,
            category_id: None,
            genre_ids: vec![],
        })
        .await
        .expect("Failed to create test title")
}

pub async fn create_test_review(pool: &SqlitePool, title_id: TitleId, author_id: UserId, score: i64) -> ReviewDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    Reviews::new(&mut conn)
        .create(&ReviewCreateDBRequest {
            title_id,
            author_id,
            text: "test review".to_string(),
            score,
        })
        .await
        .expect("Failed to create test review")
}
