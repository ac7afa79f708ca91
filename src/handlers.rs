use crate::{
    AppState,
    error::{
        ARTICLE_NOT_FOUND, ApiError, NO_ARTICLES_FOUND, PAGE_VIEW_LIMIT_REACHED,
        UNAUTHORIZED_ACCESS,
    },
    models::{Article, LoginRequest, User},
    session::{SessionSnapshot, SessionUpdate, ViewGate, gate_anonymous_view},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tower_sessions::Session;

// --- Session Handlers ---

/// clear_session
///
/// [Public Route] Resets the client's session to the fresh anonymous state:
/// both the identity and the anonymous view counter are removed. Idempotent;
/// clearing an already-fresh session is a no-op.
#[utoipa::path(
    delete,
    path = "/clear",
    responses((status = 204, description = "Session cleared"))
)]
pub async fn clear_session(session: Session) -> Result<StatusCode, ApiError> {
    SessionUpdate::reset().apply(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// login
///
/// [Public Route] Credential-less login: looks up exactly one user by exact
/// username match and, if found, binds that user's id to the session.
///
/// *Note*: no password or credential is verified; trust is placed entirely in
/// the supplied username. An unknown username leaves the session untouched
/// and returns an empty 401 body.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = User),
        (status = 401, description = "Unknown username")
    )
)]
pub async fn login(
    session: Session,
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .repo
        .find_user_by_username(&payload.username)
        .await
        .ok_or(ApiError::Unauthenticated)?;

    SessionUpdate::login(user.id).apply(&session).await?;
    Ok(Json(user))
}

/// logout
///
/// [Public Route] Drops the session identity only. The anonymous view counter
/// is deliberately preserved: a client that logs out resumes anonymous
/// counting where it left off rather than getting a fresh allowance.
#[utoipa::path(
    delete,
    path = "/logout",
    responses((status = 204, description = "Logged out"))
)]
pub async fn logout(session: Session) -> Result<StatusCode, ApiError> {
    SessionUpdate::logout().apply(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// check_session
///
/// [Public Route] Reports the current session identity. Returns the same user
/// representation that login produced. A session with no identity, or one
/// whose stored id no longer resolves to an existing user, gets an empty 401.
#[utoipa::path(
    get,
    path = "/check_session",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "No valid session identity")
    )
)]
pub async fn check_session(
    session: Session,
    State(state): State<AppState>,
) -> Result<Json<User>, ApiError> {
    let snapshot = SessionSnapshot::load(&session).await?;
    let user_id = snapshot.user_id.ok_or(ApiError::Unauthenticated)?;

    let user = state
        .repo
        .get_user(user_id)
        .await
        // Stale identity: the user was deleted after login.
        .ok_or(ApiError::Unauthenticated)?;

    Ok(Json(user))
}

// --- Public Article Handlers ---

/// list_articles
///
/// [Public Route] Lists the full article catalog in id order. No authorization
/// check and no view counting; an empty array is a valid response.
#[utoipa::path(
    get,
    path = "/articles",
    responses((status = 200, description = "All articles", body = [Article]))
)]
pub async fn list_articles(State(state): State<AppState>) -> Json<Vec<Article>> {
    let articles = state.repo.list_articles().await;
    Json(articles)
}

/// get_article
///
/// [Public Route] Retrieves a single article, applying the anonymous paywall.
///
/// Existence is checked first: a missing id is a 404 regardless of session
/// state and does not consume a view. For anonymous sessions the view counter
/// is then incremented unconditionally (including on reads past the limit) and
/// access is granted only while the count stays within the allowance.
/// Authenticated sessions read without any counter mutation.
#[utoipa::path(
    get,
    path = "/articles/{id}",
    params(("id" = i64, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Found", body = Article),
        (status = 401, description = "Anonymous view limit reached"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_article(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Article>, ApiError> {
    let article = state
        .repo
        .get_article(id)
        .await
        .ok_or(ApiError::NotFound(ARTICLE_NOT_FOUND))?;

    let snapshot = SessionSnapshot::load(&session).await?;
    let (gate, update) = gate_anonymous_view(&snapshot);
    // The counter write happens even when the gate denies access.
    update.apply(&session).await?;

    match gate {
        ViewGate::Granted => Ok(Json(article)),
        ViewGate::LimitReached => Err(ApiError::Unauthorized(PAGE_VIEW_LIMIT_REACHED)),
    }
}

// --- Member-Only Article Handlers ---

/// list_member_articles
///
/// [Member Route] Lists the full catalog for logged-in sessions. Anonymous
/// access is fully blocked here, so the paywall counter does not apply. An
/// empty catalog is reported as 404 rather than an empty array.
#[utoipa::path(
    get,
    path = "/members_only_articles",
    responses(
        (status = 200, description = "All articles", body = [Article]),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "No articles exist")
    )
)]
pub async fn list_member_articles(
    session: Session,
    State(state): State<AppState>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let snapshot = SessionSnapshot::load(&session).await?;
    if !snapshot.is_authenticated() {
        return Err(ApiError::Unauthorized(UNAUTHORIZED_ACCESS));
    }

    let articles = state.repo.list_articles().await;
    if articles.is_empty() {
        return Err(ApiError::NotFound(NO_ARTICLES_FOUND));
    }

    Ok(Json(articles))
}

/// get_member_article
///
/// [Member Route] Retrieves a single article for logged-in sessions.
/// The identity check runs before the existence check, so an anonymous client
/// probing an unknown id still sees 401, not 404.
#[utoipa::path(
    get,
    path = "/members_only_articles/{id}",
    params(("id" = i64, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Found", body = Article),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_member_article(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Article>, ApiError> {
    let snapshot = SessionSnapshot::load(&session).await?;
    if !snapshot.is_authenticated() {
        return Err(ApiError::Unauthorized(UNAUTHORIZED_ACCESS));
    }

    let article = state
        .repo
        .get_article(id)
        .await
        .ok_or(ApiError::NotFound(ARTICLE_NOT_FOUND))?;

    Ok(Json(article))
}
