//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! - **Auth** (`/v1/auth/*`): Signup and confirmation-code token exchange
//! - **Users** (`/v1/users/*`): User administration plus the `me` profile
//! - **Categories / Genres** (`/v1/categories`, `/v1/genres`): Reference tables
//! - **Titles** (`/v1/titles/*`): The catalog, with filtering and ratings
//! - **Reviews / Comments**: Nested under their parent title and review
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`;
//! interactive documentation is served at `/docs` when the server is running.

pub mod handlers;
pub mod models;
