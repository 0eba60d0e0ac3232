//! Repository implementations for database access.
//!
//! This module provides repository structs for each entity in the system.
//! Each repository:
//! - Wraps a SQLx connection or transaction
//! - Provides strongly-typed CRUD operations
//! - Handles query construction and parameter binding
//! - Returns domain models from [`crate::db::models`]
//!
//! [`Users`], [`Titles`], [`Reviews`] and [`Comments`] implement the full
//! [`Repository`] trait; [`Categories`] and [`Genres`] expose only the
//! list/create/delete surface their API offers.

pub mod categories;
pub mod comments;
pub mod genres;
pub mod repository;
pub mod reviews;
pub mod titles;
pub mod users;

pub use categories::Categories;
pub use comments::Comments;
pub use genres::Genres;
pub use repository::Repository;
pub use reviews::Reviews;
pub use titles::Titles;
pub use users::Users;
