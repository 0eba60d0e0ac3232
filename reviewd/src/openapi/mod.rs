//! OpenAPI documentation configuration.
//!
//! Aggregates every handler's path annotation into a single [`ApiDoc`],
//! served interactively at `/docs` and as JSON at `/api-docs/openapi.json`.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "reviewd",
        description = "Collaborative media-review catalog API"
    ),
    paths(
        crate::api::handlers::auth::signup,
        crate::api::handlers::auth::obtain_token,
        crate::api::handlers::users::list_users,
        crate::api::handlers::users::create_user,
        crate::api::handlers::users::get_user,
        crate::api::handlers::users::update_user,
        crate::api::handlers::users::delete_user,
        crate::api::handlers::users::get_me,
        crate::api::handlers::users::update_me,
        crate::api::handlers::categories::list_categories,
        crate::api::handlers::categories::create_category,
        crate::api::handlers::categories::delete_category,
        crate::api::handlers::genres::list_genres,
        crate::api::handlers::genres::create_genre,
        crate::api::handlers::genres::delete_genre,
        crate::api::handlers::titles::list_titles,
        crate::api::handlers::titles::create_title,
        crate::api::handlers::titles::get_title,
        crate::api::handlers::titles::update_title,
        crate::api::handlers::titles::delete_title,
        crate::api::handlers::reviews::list_reviews,
        crate::api::handlers::reviews::create_review,
        crate::api::handlers::reviews::get_review,
        crate::api::handlers::reviews::update_review,
        crate::api::handlers::reviews::delete_review,
        crate::api::handlers::comments::list_comments,
        crate::api::handlers::comments::create_comment,
        crate::api::handlers::comments::get_comment,
        crate::api::handlers::comments::update_comment,
        crate::api::handlers::comments::delete_comment,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Signup and token exchange"),
        (name = "users", description = "User administration and profiles"),
        (name = "categories", description = "Category reference table"),
        (name = "genres", description = "Genre reference table"),
        (name = "titles", description = "Catalog titles"),
        (name = "reviews", description = "Reviews on titles"),
        (name = "comments", description = "Comments on reviews"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}
