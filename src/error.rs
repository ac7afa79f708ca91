use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Canonical error-body texts. These strings are part of the wire contract and
// are asserted verbatim by the end-to-end tests.
pub const ARTICLE_NOT_FOUND: &str = "Article not found";
pub const NO_ARTICLES_FOUND: &str = "No articles found";
pub const PAGE_VIEW_LIMIT_REACHED: &str = "Maximum pageview limit reached";
pub const UNAUTHORIZED_ACCESS: &str = "Unauthorized access";

/// ApiError
///
/// The complete failure taxonomy of the HTTP surface. Every handler returns
/// `Result<_, ApiError>`, and the `IntoResponse` implementation below is the
/// single place where failures are mapped to status codes and JSON bodies.
///
/// All failures are terminal per-request: the client must take external action
/// (log in, clear the session, stop requesting). None are fatal to the server.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing entity. Renders 404 with a `{"message": ...}` body.
    #[error("{0}")]
    NotFound(&'static str),

    /// Policy denial carrying an explanatory message (view limit reached,
    /// member-only access without identity). Renders 401 with a message body.
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Missing or unresolvable session identity where the contract calls for
    /// an *empty* 401 body (failed login, stale check_session).
    #[error("no authenticated session")]
    Unauthenticated,

    /// Session store failure. Surfaced as a generic 500; the underlying cause
    /// is logged, never leaked to the client.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "message": message }))).into_response()
            }
            // The original contract returns a bare `{}` here, not a message body.
            ApiError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, Json(json!({}))).into_response()
            }
            ApiError::Session(err) => {
                tracing::error!("session store failure: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
