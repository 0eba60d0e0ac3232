//! Policy predicates, evaluated per action before any mutation.
//!
//! Read endpoints are public, so only writes call into this module. Every
//! predicate takes the operation and resource being attempted so the
//! resulting 403 names what was denied.

use crate::{
    api::models::users::CurrentUser,
    errors::{Error, Result},
    types::{Operation, Permission, Resource, UserId},
};

/// Admin-only: admin role or the bootstrap superuser flag.
pub fn require_admin(user: &CurrentUser, action: Operation, resource: Resource) -> Result<()> {
    if user.is_admin() {
        return Ok(());
    }
    Err(Error::InsufficientPermissions {
        required: Permission::Allow(resource, action),
        action,
        resource: resource.to_string(),
    })
}

/// Author-or-privileged: the resource's author, or an admin/moderator/superuser.
pub fn require_author_or_privileged(user: &CurrentUser, author_id: UserId, action: Operation, resource: Resource) -> Result<()> {
    if user.id == author_id || user.is_privileged() {
        return Ok(());
    }
    Err(Error::InsufficientPermissions {
        required: Permission::Owner(resource),
        action,
        resource: resource.to_string(),
    })
}
