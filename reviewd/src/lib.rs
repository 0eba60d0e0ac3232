//! # reviewd: Collaborative Media-Review Catalog API
//!
//! `reviewd` is a REST API for a collaborative review catalog: users sign up,
//! exchange an emailed confirmation code for a bearer token, browse
//! categorized and genred titles, and post reviews and comments. Access is
//! governed by three role-based policies - admin-only for user
//! administration, admin-or-read-only for the catalog and its reference
//! tables, and author-or-privileged-or-read-only for reviews and comments.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and uses SQLite through SQLx for persistence. Migrations
//! run automatically on startup.
//!
//! ### Request Flow
//!
//! A request passes through the tracing and CORS layers, then router
//! dispatch. Write handlers authenticate the caller with the bearer-token
//! extractor and evaluate the route's policy before touching the database;
//! read handlers are public. Handlers talk to the database exclusively
//! through the repositories in [`db::handlers`] and serialize responses with
//! the models in [`api::models`]. Nothing runs in the background and no
//! state outlives the request beyond the connection pool.
//!
//! ### Core Components
//!
//! - The **API layer** ([`api`]) exposes the REST surface under `/v1` with
//!   explicit handlers per route.
//! - The **authentication layer** ([`auth`]) issues and verifies bearer
//!   tokens and hosts the policy predicates.
//! - The **database layer** ([`db`]) uses the repository pattern; each
//!   entity has a repository handling its queries and mutations.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use reviewd::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = reviewd::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     reviewd::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
mod crypto;
pub mod db;
mod email;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use crate::{
    db::handlers::{Repository, Users},
    db::models::users::UserCreateDBRequest,
    openapi::ApiDoc,
};
use api::models::users::Role;
use axum::{
    http::{self, HeaderValue},
    routing::{delete, get, post},
    Json, Router,
};
use bon::Builder;
use chrono::Utc;
pub use config::Config;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, instrument, Level};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{CategoryId, CommentId, GenreId, ReviewId, TitleId, UserId};

/// Application state shared across all request handlers.
///
/// Holds only the connection pool and the immutable configuration; there is
/// no other in-process state.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
}

/// Get the reviewd database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create the initial admin user if it doesn't exist.
///
/// Idempotent: called on every startup, it creates the configured admin on
/// first run and re-asserts the admin role and superuser flag afterwards, so
/// there is always at least one account that can administer the catalog.
/// The admin obtains a token through the regular signup flow, which
/// regenerates and re-sends the confirmation code.
#[instrument(skip_all)]
pub async fn create_initial_admin_user(username: &str, email: &str, db: &SqlitePool) -> anyhow::Result<UserId> {
    let mut tx = db.begin().await?;

    let existing = {
        let mut user_repo = Users::new(&mut tx);
        user_repo.get_by_username(username).await?
    };

    if let Some(existing) = existing {
        sqlx::query("UPDATE users SET role = 'admin', is_superuser = 1, updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(existing.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        return Ok(existing.id);
    }

    let created = {
        let mut user_repo = Users::new(&mut tx);
        user_repo
            .create(&UserCreateDBRequest {
                username: username.to_string(),
                email: email.to_string(),
                first_name: None,
                last_name: None,
                bio: None,
                role: Role::Admin,
                is_superuser: true,
                confirmation_code: None,
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create admin user: {e}"))?
    };

    tx.commit().await?;
    info!("Created initial admin user '{username}'");
    Ok(created.id)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut cors = CorsLayer::new().expose_headers(vec![http::header::LOCATION]);

    // The wildcard origin cannot be combined with credentials
    if config.cors.allowed_origins.iter().any(|origin| origin == "*") {
        cors = cors.allow_origin(tower_http::cors::Any);
    } else {
        let mut origins = Vec::new();
        for origin in &config.cors.allowed_origins {
            origins.push(origin.parse::<HeaderValue>()?);
        }
        cors = cors.allow_origin(origins).allow_credentials(config.cors.allow_credentials);
    }

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the main application router with all endpoints and middleware.
///
/// - Auth routes (signup, token exchange)
/// - Resource routes under `/v1` per entity
/// - Interactive API documentation at `/docs`
/// - CORS configuration and tracing middleware
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        // Auth flow (anonymous)
        .route("/auth/signup", post(api::handlers::auth::signup))
        .route("/auth/token", post(api::handlers::auth::obtain_token))
        // User management (admin only), plus the self-service profile
        .route("/users", get(api::handlers::users::list_users).post(api::handlers::users::create_user))
        .route("/users/me", get(api::handlers::users::get_me).patch(api::handlers::users::update_me))
        .route(
            "/users/{username}",
            get(api::handlers::users::get_user)
                .patch(api::handlers::users::update_user)
                .delete(api::handlers::users::delete_user),
        )
        // Reference tables (reads public, writes admin)
        .route(
            "/categories",
            get(api::handlers::categories::list_categories).post(api::handlers::categories::create_category),
        )
        .route("/categories/{slug}", delete(api::handlers::categories::delete_category))
        .route("/genres", get(api::handlers::genres::list_genres).post(api::handlers::genres::create_genre))
        .route("/genres/{slug}", delete(api::handlers::genres::delete_genre))
        // Catalog titles (reads public, writes admin)
        .route("/titles", get(api::handlers::titles::list_titles).post(api::handlers::titles::create_title))
        .route(
            "/titles/{title_id}",
            get(api::handlers::titles::get_title)
                .patch(api::handlers::titles::update_title)
                .delete(api::handlers::titles::delete_title),
        )
        // Reviews scoped to a parent title
        .route(
            "/titles/{title_id}/reviews",
            get(api::handlers::reviews::list_reviews).post(api::handlers::reviews::create_review),
        )
        .route(
            "/titles/{title_id}/reviews/{review_id}",
            get(api::handlers::reviews::get_review)
                .patch(api::handlers::reviews::update_review)
                .delete(api::handlers::reviews::delete_review),
        )
        // Comments scoped to a parent review
        .route(
            "/titles/{title_id}/reviews/{review_id}/comments",
            get(api::handlers::comments::list_comments).post(api::handlers::comments::create_comment),
        )
        .route(
            "/titles/{title_id}/reviews/{review_id}/comments/{comment_id}",
            get(api::handlers::comments::get_comment)
                .patch(api::handlers::comments::update_comment)
                .delete(api::handlers::comments::delete_comment),
        );

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/v1", api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .with_state(state.clone());

    let cors_layer = create_cors_layer(&state.config)?;

    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] connects the pool, runs migrations
///    and creates the bootstrap admin
/// 2. **Serve**: [`Application::serve`] binds a TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
    pool: SqlitePool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Create an application around an existing pool (used by tests).
    pub async fn new_with_pool(config: Config, pool: Option<SqlitePool>) -> anyhow::Result<Self> {
        let pool = match pool {
            Some(pool) => pool,
            None => {
                let options = SqliteConnectOptions::from_str(&config.database.url)?
                    .create_if_missing(true)
                    .foreign_keys(true);
                SqlitePoolOptions::new().max_connections(5).connect_with(options).await?
            }
        };

        // Idempotent on pools that already carry the schema
        migrator().run(&pool).await?;

        create_initial_admin_user(&config.admin_username, &config.admin_email, &pool).await?;

        let state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(&state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(any(test, feature = "test-utils"))]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("Review catalog listening on http://{bind_addr}");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::api::models::users::Role;
    use crate::db::handlers::Users;
    use crate::test_utils::*;
    use serde_json::json;
    use sqlx::SqlitePool;

    fn bearer(user: &crate::db::models::users::UserDBResponse) -> String {
        let config = create_test_config();
        format!("Bearer {}", bearer_token_for(user.id, &user.username, &config))
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_anonymous_reads_pass_writes_fail(pool: SqlitePool) {
        let server = create_test_app(pool.clone()).await;
        let title = create_test_title(&pool, "M", 1931).await;
        let user = create_test_user(&pool, Role::User).await;
        let review = create_test_review(&pool, title.id, user.id, 8).await;

        // Anonymous reads succeed on every listing
        for path in [
            "/v1/titles".to_string(),
            "/v1/categories".to_string(),
            "/v1/genres".to_string(),
            format!("/v1/titles/{}/reviews", title.id),
            format!("/v1/titles/{}/reviews/{}/comments", title.id, review.id),
        ] {
            let response = server.get(&path).await;
            assert_eq!(response.status_code(), 200, "anonymous GET {path} should pass");
        }

        // Anonymous writes are rejected outright
        let response = server.post("/v1/categories").json(&json!({"name": "Films", "slug": "films"})).await;
        assert_eq!(response.status_code(), 401);

        // Authenticated but unprivileged writes are forbidden
        let response = server
            .post("/v1/categories")
            .add_header("authorization", bearer(&user))
            .json(&json!({"name": "Films", "slug": "films"}))
            .await;
        assert_eq!(response.status_code(), 403);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_signup_and_token_exchange(pool: SqlitePool) {
        let server = create_test_app(pool.clone()).await;

        let response = server
            .post("/v1/auth/signup")
            .json(&json!({"email": "greta@example.com", "username": "greta"}))
            .await;
        assert_eq!(response.status_code(), 200);
        let body: serde_json::Value = response.json();
        assert_eq!(body["username"], "greta");
        assert_eq!(body["email"], "greta@example.com");

        // The stored code is what gets emailed
        let mut conn = pool.acquire().await.unwrap();
        let user = Users::new(&mut conn).get_by_username("greta").await.unwrap().unwrap();
        let code = user.confirmation_code.clone().expect("signup must store a code");
        drop(conn);

        // Unknown username -> 404
        let response = server
            .post("/v1/auth/token")
            .json(&json!({"username": "nobody", "confirmation_code": &code}))
            .await;
        assert_eq!(response.status_code(), 404);

        // Wrong code -> 400
        let response = server
            .post("/v1/auth/token")
            .json(&json!({"username": "greta", "confirmation_code": "wrong"}))
            .await;
        assert_eq!(response.status_code(), 400);

        // Correct code -> 201 with a usable token
        let response = server
            .post("/v1/auth/token")
            .json(&json!({"username": "greta", "confirmation_code": &code}))
            .await;
        assert_eq!(response.status_code(), 201);
        let body: serde_json::Value = response.json();
        let token = body["token"].as_str().unwrap().to_string();

        let response = server
            .get("/v1/users/me")
            .add_header("authorization", format!("Bearer {token}"))
            .await;
        assert_eq!(response.status_code(), 200);
        let body: serde_json::Value = response.json();
        assert_eq!(body["username"], "greta");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_signup_validation_and_code_rotation(pool: SqlitePool) {
        let server = create_test_app(pool.clone()).await;

        // The reserved self-reference username is rejected
        let response = server
            .post("/v1/auth/signup")
            .json(&json!({"email": "me@example.com", "username": "me"}))
            .await;
        assert_eq!(response.status_code(), 400);

        // Bad email shape is rejected
        let response = server
            .post("/v1/auth/signup")
            .json(&json!({"email": "not-an-email", "username": "someone"}))
            .await;
        assert_eq!(response.status_code(), 400);

        // First signup
        let response = server
            .post("/v1/auth/signup")
            .json(&json!({"email": "ada@example.com", "username": "ada"}))
            .await;
        assert_eq!(response.status_code(), 200);

        let mut conn = pool.acquire().await.unwrap();
        let first_code = Users::new(&mut conn)
            .get_by_username("ada")
            .await
            .unwrap()
            .unwrap()
            .confirmation_code
            .unwrap();
        drop(conn);

        // Same identity signing up again rotates the code
        let response = server
            .post("/v1/auth/signup")
            .json(&json!({"email": "ada@example.com", "username": "ada"}))
            .await;
        assert_eq!(response.status_code(), 200);

        let mut conn = pool.acquire().await.unwrap();
        let second_code = Users::new(&mut conn)
            .get_by_username("ada")
            .await
            .unwrap()
            .unwrap()
            .confirmation_code
            .unwrap();
        drop(conn);
        assert_ne!(first_code, second_code);

        // Taking just the username (different email) is a 400
        let response = server
            .post("/v1/auth/signup")
            .json(&json!({"email": "other@example.com", "username": "ada"}))
            .await;
        assert_eq!(response.status_code(), 400);

        // Taking just the email (different username) is a 400
        let response = server
            .post("/v1/auth/signup")
            .json(&json!({"email": "ada@example.com", "username": "ada2"}))
            .await;
        assert_eq!(response.status_code(), 400);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_one_review_per_title_and_rating(pool: SqlitePool) {
        let server = create_test_app(pool.clone()).await;
        let title = create_test_title(&pool, "Vertigo", 1958).await;
        let first = create_test_user(&pool, Role::User).await;
        let second = create_test_user(&pool, Role::User).await;

        let response = server
            .post(&format!("/v1/titles/{}/reviews", title.id))
            .add_header("authorization", bearer(&first))
            .json(&json!({"text": "dizzying", "score": 9}))
            .await;
        assert_eq!(response.status_code(), 201);
        let body: serde_json::Value = response.json();
        assert_eq!(body["author"], first.username, "author is set server-side");

        // Second attempt by the same user -> 400
        let response = server
            .post(&format!("/v1/titles/{}/reviews", title.id))
            .add_header("authorization", bearer(&first))
            .json(&json!({"text": "still dizzying", "score": 8}))
            .await;
        assert_eq!(response.status_code(), 400);

        // Out-of-range score -> 400
        let response = server
            .post(&format!("/v1/titles/{}/reviews", title.id))
            .add_header("authorization", bearer(&second))
            .json(&json!({"text": "eleven", "score": 11}))
            .await;
        assert_eq!(response.status_code(), 400);

        let response = server
            .post(&format!("/v1/titles/{}/reviews", title.id))
            .add_header("authorization", bearer(&second))
            .json(&json!({"text": "fine", "score": 6}))
            .await;
        assert_eq!(response.status_code(), 201);

        // Rating is the arithmetic mean of the two scores
        let response = server.get(&format!("/v1/titles/{}", title.id)).await;
        assert_eq!(response.status_code(), 200);
        let body: serde_json::Value = response.json();
        assert_eq!(body["rating"], json!(7.5));

        // A title without reviews has no rating
        let bare = create_test_title(&pool, "Unseen", 2001).await;
        let response = server.get(&format!("/v1/titles/{}", bare.id)).await;
        let body: serde_json::Value = response.json();
        assert_eq!(body["rating"], serde_json::Value::Null);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_author_and_moderator_edit_rights(pool: SqlitePool) {
        let server = create_test_app(pool.clone()).await;
        let title = create_test_title(&pool, "Le Samourai", 1967).await;
        let author = create_test_user(&pool, Role::User).await;
        let stranger = create_test_user(&pool, Role::User).await;
        let moderator = create_test_user(&pool, Role::Moderator).await;
        let review = create_test_review(&pool, title.id, author.id, 7).await;
        let review_path = format!("/v1/titles/{}/reviews/{}", title.id, review.id);

        // A stranger cannot edit someone else's review
        let response = server
            .patch(&review_path)
            .add_header("authorization", bearer(&stranger))
            .json(&json!({"score": 1}))
            .await;
        assert_eq!(response.status_code(), 403);

        // The author can
        let response = server
            .patch(&review_path)
            .add_header("authorization", bearer(&author))
            .json(&json!({"score": 8}))
            .await;
        assert_eq!(response.status_code(), 200);

        // So can a moderator
        let response = server
            .patch(&review_path)
            .add_header("authorization", bearer(&moderator))
            .json(&json!({"text": "tidied up by the moderation team"}))
            .await;
        assert_eq!(response.status_code(), 200);

        // And a moderator may delete outright
        let response = server.delete(&review_path).add_header("authorization", bearer(&moderator)).await;
        assert_eq!(response.status_code(), 204);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_me_cannot_self_promote(pool: SqlitePool) {
        let server = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool, Role::User).await;

        // The role field in the payload is ignored for non-admin actors
        let response = server
            .patch("/v1/users/me")
            .add_header("authorization", bearer(&user))
            .json(&json!({"bio": "harmless bio update", "role": "admin"}))
            .await;
        assert_eq!(response.status_code(), 200);
        let body: serde_json::Value = response.json();
        assert_eq!(body["role"], "user");
        assert_eq!(body["bio"], "harmless bio update");

        // An admin can change roles through the admin endpoint
        let admin = create_test_user(&pool, Role::Admin).await;
        let response = server
            .patch(&format!("/v1/users/{}", user.username))
            .add_header("authorization", bearer(&admin))
            .json(&json!({"role": "moderator"}))
            .await;
        assert_eq!(response.status_code(), 200);
        let body: serde_json::Value = response.json();
        assert_eq!(body["role"], "moderator");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_category_lifecycle_and_set_null(pool: SqlitePool) {
        let server = create_test_app(pool.clone()).await;
        let admin = create_test_user(&pool, Role::Admin).await;

        let response = server
            .post("/v1/categories")
            .add_header("authorization", bearer(&admin))
            .json(&json!({"name": "Films", "slug": "films"}))
            .await;
        assert_eq!(response.status_code(), 201);

        let response = server
            .post("/v1/titles")
            .add_header("authorization", bearer(&admin))
            .json(&json!({"name": "Breathless", "year": 1960, "category": "films", "genre": []}))
            .await;
        assert_eq!(response.status_code(), 201);
        let title: serde_json::Value = response.json();
        assert_eq!(title["category"]["slug"], "films");

        // Unknown slugs in a write are a validation error
        let response = server
            .post("/v1/titles")
            .add_header("authorization", bearer(&admin))
            .json(&json!({"name": "Alphaville", "year": 1965, "category": "does-not-exist"}))
            .await;
        assert_eq!(response.status_code(), 400);

        // Deleting the category empties the reference instead of deleting the title
        let response = server.delete("/v1/categories/films").add_header("authorization", bearer(&admin)).await;
        assert_eq!(response.status_code(), 204);

        let response = server.get(&format!("/v1/titles/{}", title["id"].as_str().unwrap())).await;
        assert_eq!(response.status_code(), 200);
        let body: serde_json::Value = response.json();
        assert_eq!(body["category"], serde_json::Value::Null);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_title_year_validation_and_filters(pool: SqlitePool) {
        let server = create_test_app(pool.clone()).await;
        let admin = create_test_user(&pool, Role::Admin).await;

        let next_year = i64::from(chrono::Datelike::year(&chrono::Utc::now())) + 1;
        let response = server
            .post("/v1/titles")
            .add_header("authorization", bearer(&admin))
            .json(&json!({"name": "From The Future", "year": next_year}))
            .await;
        assert_eq!(response.status_code(), 400);

        create_test_genre(&pool, "noir").await;
        let response = server
            .post("/v1/titles")
            .add_header("authorization", bearer(&admin))
            .json(&json!({"name": "The Killers", "year": 1946, "genre": ["noir"]}))
            .await;
        assert_eq!(response.status_code(), 201);
        create_test_title(&pool, "The Killers", 1964).await;

        let response = server.get("/v1/titles?name=killers&year=1946&genre=noir").await;
        assert_eq!(response.status_code(), 200);
        let body: serde_json::Value = response.json();
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["year"], 1946);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_comment_flow_and_missing_parents(pool: SqlitePool) {
        let server = create_test_app(pool.clone()).await;
        let title = create_test_title(&pool, "Rear Window", 1954).await;
        let author = create_test_user(&pool, Role::User).await;
        let review = create_test_review(&pool, title.id, author.id, 9).await;
        let commenter = create_test_user(&pool, Role::User).await;

        let comments_path = format!("/v1/titles/{}/reviews/{}/comments", title.id, review.id);
        let response = server
            .post(&comments_path)
            .add_header("authorization", bearer(&commenter))
            .json(&json!({"text": "Exactly right"}))
            .await;
        assert_eq!(response.status_code(), 201);
        let comment: serde_json::Value = response.json();
        assert_eq!(comment["author"], commenter.username);

        // A review reached through the wrong title is a 404
        let other_title = create_test_title(&pool, "Rope", 1948).await;
        let response = server
            .get(&format!("/v1/titles/{}/reviews/{}/comments", other_title.id, review.id))
            .await;
        assert_eq!(response.status_code(), 404);

        // Missing title is a 404 before any comment lookup happens
        let response = server
            .get(&format!(
                "/v1/titles/{}/reviews/{}/comments",
                uuid::Uuid::new_v4(),
                review.id
            ))
            .await;
        assert_eq!(response.status_code(), 404);
    }
}
