//! HTTP request handlers for all API endpoints.
//!
//! This module contains Axum route handlers organized by resource type.
//! Each handler is responsible for:
//! - Request validation and deserialization
//! - Authentication and authorization checks
//! - Business logic execution via database repositories
//! - Response serialization
//!
//! # Handler Modules
//!
//! - [`auth`]: Signup and confirmation-code token exchange
//! - [`users`]: User administration and the self-service profile endpoint
//! - [`categories`]: Category reference table
//! - [`genres`]: Genre reference table
//! - [`titles`]: Catalog titles with filtering and derived ratings
//! - [`reviews`]: Reviews nested under a parent title
//! - [`comments`]: Comments nested under a parent review
//!
//! # Authentication
//!
//! Write handlers take the [`crate::api::models::users::CurrentUser`]
//! extractor; read handlers are public. Policy checks run before any
//! mutation, so authorization failures never leave partial effects.
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Error`] which converts to the
//! appropriate HTTP status code and JSON error body.

pub mod auth;
pub mod categories;
pub mod comments;
pub mod genres;
pub mod reviews;
pub mod titles;
pub mod users;
