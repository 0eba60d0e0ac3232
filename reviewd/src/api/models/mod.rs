//! API request and response data models.
//!
//! These structures define the public API contract and are distinct from the
//! database models, so the storage and API representations can evolve
//! independently. Validation helpers for user-supplied fields live next to
//! the models they guard.

pub mod auth;
pub mod categories;
pub mod comments;
pub mod genres;
pub mod pagination;
pub mod reviews;
pub mod titles;
pub mod users;
