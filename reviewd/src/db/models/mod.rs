//! Database record models matching table schemas.
//!
//! Structs here directly correspond to database rows and the requests used
//! to create or update them. They are distinct from the API models in
//! [`crate::api::models`] so that storage and API representations can evolve
//! independently; conversions between the two live next to the types.

pub mod categories;
pub mod comments;
pub mod genres;
pub mod reviews;
pub mod titles;
pub mod users;
