use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Core Application Schemas (Mapped to Database) ---

/// Article
///
/// Represents a single article record from the `articles` table.
/// This is the primary data structure served by the read endpoints; the
/// application never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow, Default)]
pub struct Article {
    pub id: i64,
    pub author: String,
    pub title: String,
    /// Full body text, only released once the paywall policy grants access.
    pub content: String,
    /// Short teaser shown in listings.
    pub preview: String,
    pub minutes_to_read: i64,
    pub created_at: DateTime<Utc>,
}

/// User
///
/// Represents a user's identity record stored in the `users` table.
/// Looked up by exact username at login and by id when resolving the session.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow, Default)]
pub struct User {
    pub id: i64,
    /// The login identifier. Lookup is an exact match; no credential is checked.
    pub username: String,
    /// Optional display name.
    pub name: Option<String>,
}

/// --- Request Payloads (Input Schemas) ---

/// LoginRequest
///
/// Input payload for the login endpoint (POST /login).
/// Trust is placed entirely in the supplied username; there is no password field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct LoginRequest {
    pub username: String,
}
