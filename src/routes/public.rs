use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Public Router Module
///
/// Defines endpoints that are accessible to any client (anonymous or
/// logged-in): the article catalog, the rate-limited single-article read, and
/// the session lifecycle operations (clear, login, logout, check).
///
/// Policy Mandate:
/// The single-article read must apply the anonymous paywall (counter
/// increment + limit comparison) inside its handler on every anonymous call.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        // Returns "ok" immediately to verify the service is running and responsive.
        .route("/health", get(|| async { "ok" }))
        // DELETE /clear
        // Resets the session to the fresh anonymous state (identity and counter removed).
        .route("/clear", delete(handlers::clear_session))
        // GET /articles
        // Lists every article in id order. No authorization check, no view counting.
        .route("/articles", get(handlers::list_articles))
        // GET /articles/{id}
        // Retrieves one article. Anonymous sessions consume one unit of their
        // view allowance per call; authenticated sessions read freely.
        .route("/articles/{id}", get(handlers::get_article))
        // POST /login
        // Credential-less login by exact username match; binds user_id to the session.
        .route("/login", post(handlers::login))
        // DELETE /logout
        // Drops the session identity, leaving the view counter in place.
        .route("/logout", delete(handlers::logout))
        // GET /check_session
        // Reports the currently logged-in user, or an empty 401.
        .route("/check_session", get(handlers::check_session))
}
