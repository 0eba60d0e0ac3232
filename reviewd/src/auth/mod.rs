//! Authentication and authorization system.
//!
//! # Authentication
//!
//! The only credential is a bearer token obtained through the two-step
//! signup flow:
//!
//! 1. `POST /v1/auth/signup` stores a confirmation code for the identity and
//!    hands it to the email collaborator.
//! 2. `POST /v1/auth/token` exchanges username + code for a signed JWT.
//!
//! Requests then carry `Authorization: Bearer <jwt>`. The [`current_user`]
//! extractor verifies the signature and reloads the user from the database,
//! so role changes apply immediately rather than at token expiry.
//!
//! # Authorization
//!
//! Access control is an explicit policy layer in [`permissions`], evaluated
//! per action before any mutation:
//!
//! - **Admin-only**: user administration.
//! - **Admin-or-read-only**: reference data and titles - anyone may read,
//!   only admins write.
//! - **Author-or-privileged-or-read-only**: reviews and comments - anyone
//!   may read, authors edit their own content, admins and moderators edit
//!   anyone's.
//!
//! # Modules
//!
//! - [`current_user`]: Extractor for the authenticated user in handlers
//! - [`permissions`]: Policy predicates
//! - [`token`]: Bearer token creation and verification

pub mod current_user;
pub mod permissions;
pub mod token;
