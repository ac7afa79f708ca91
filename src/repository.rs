use crate::models::{Article, User};
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations. This is the core
/// of the Repository Abstraction pattern, allowing the handlers to interact with
/// the data layer without knowing the specific implementation (SQLite, Mock, etc.).
///
/// **Send + Sync + async_trait** are required to make the trait object (`Arc<dyn Repository>`)
/// safely shareable and usable across Axum's asynchronous task boundaries.
///
/// All operations are read-only: this system owns no persistent entity and only
/// consumes article and user records.
#[async_trait]
pub trait Repository: Send + Sync {
    // Full catalog in insertion (id) order. An empty vec is a valid result.
    async fn list_articles(&self) -> Vec<Article>;
    async fn get_article(&self, id: i64) -> Option<Article>;

    // Identity lookups used by login and session resolution.
    async fn get_user(&self, id: i64) -> Option<User>;
    async fn find_user_by_username(&self, username: &str) -> Option<User>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer access across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// SqliteRepository
///
/// The concrete implementation of the `Repository` trait, backed by the SQLite database.
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// init_schema
    ///
    /// Creates the `articles` and `users` tables if they do not exist yet.
    /// Run once at startup; stands in for an external migration pipeline.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS articles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                author TEXT NOT NULL,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                preview TEXT NOT NULL,
                minutes_to_read INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                name TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// seed_demo_data
    ///
    /// Inserts a handful of demo articles and users when the database is empty.
    /// LOCAL-ONLY convenience so the API has content to serve out of the box.
    pub async fn seed_demo_data(&self) -> Result<(), sqlx::Error> {
        let article_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await?;
        if article_count > 0 {
            return Ok(());
        }

        let now = chrono::Utc::now();
        let demo_articles = [
            (
                "Amanda Keefer",
                "Three Essays On The Theory Of Sexuality",
                "A look at the essays that shaped a century of debate.",
                "A look at the essays...",
                3i64,
            ),
            (
                "Hazel Sloan",
                "Dress Your Best On A Budget",
                "Fashion advice that respects your wallet as much as your wardrobe.",
                "Fashion advice that...",
                2i64,
            ),
            (
                "Paul Blart",
                "The Best Of The Best",
                "An exhaustive ranking of things already ranked elsewhere.",
                "An exhaustive ranking...",
                6i64,
            ),
            (
                "Dorothea Chung",
                "Backpacking Across Europe On $10 A Day",
                "It can be done, provided you enjoy walking and skipping lunch.",
                "It can be done...",
                4i64,
            ),
        ];

        for (author, title, content, preview, minutes) in demo_articles {
            sqlx::query(
                "INSERT INTO articles (author, title, content, preview, minutes_to_read, created_at) VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(author)
            .bind(title)
            .bind(content)
            .bind(preview)
            .bind(minutes)
            .bind(now)
            .execute(&self.pool)
            .await?;
        }

        for (username, name) in [("duane", "Duane Hopper"), ("cheryl", "Cheryl Sims")] {
            sqlx::query("INSERT INTO users (username, name) VALUES ($1, $2)")
                .bind(username)
                .bind(name)
                .execute(&self.pool)
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    /// list_articles
    ///
    /// Returns the full catalog in id (insertion) order. Database failures are
    /// logged and collapse to an empty list rather than a 500.
    async fn list_articles(&self) -> Vec<Article> {
        match sqlx::query_as::<_, Article>(
            "SELECT id, author, title, content, preview, minutes_to_read, created_at FROM articles ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        {
            Ok(articles) => articles,
            Err(e) => {
                tracing::error!("list_articles error: {:?}", e);
                vec![]
            }
        }
    }

    /// get_article
    ///
    /// Retrieves a single article by id. Missing rows and database failures both
    /// resolve to `None`; the failure is logged.
    async fn get_article(&self, id: i64) -> Option<Article> {
        sqlx::query_as::<_, Article>(
            "SELECT id, author, title, content, preview, minutes_to_read, created_at FROM articles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_article error: {:?}", e);
            None
        })
    }

    /// get_user
    ///
    /// Resolves the session's `user_id` back to a user record. A stale id (user
    /// deleted after login) resolves to `None`, which the caller maps to 401.
    async fn get_user(&self, id: i64) -> Option<User> {
        sqlx::query_as::<_, User>("SELECT id, username, name FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_user error: {:?}", e);
                None
            })
    }

    /// find_user_by_username
    ///
    /// Exact-match username lookup used by login. SQLite TEXT comparison is
    /// case-sensitive, which matches the exact-match contract.
    async fn find_user_by_username(&self, username: &str) -> Option<User> {
        sqlx::query_as::<_, User>("SELECT id, username, name FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("find_user_by_username error: {:?}", e);
                None
            })
    }
}
