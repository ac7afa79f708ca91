use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Member-Only Router Module
///
/// Defines endpoints reserved for sessions carrying an identity. The gate is
/// binary (logged-in or not); the anonymous view counter plays no role here
/// since anonymous access is fully blocked.
pub fn member_routes() -> Router<AppState> {
    Router::new()
        // GET /members_only_articles
        // Full catalog for members. Empty catalog reports 404, not [].
        .route(
            "/members_only_articles",
            get(handlers::list_member_articles),
        )
        // GET /members_only_articles/{id}
        // Single article for members. Identity is checked before existence.
        .route(
            "/members_only_articles/{id}",
            get(handlers::get_member_article),
        )
}
