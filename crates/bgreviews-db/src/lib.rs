use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;

use bgreviews_core::AppConfig;

pub mod categories;
pub mod comments;
pub mod mutations;
pub mod reviews;
pub mod users;

pub use categories::{category_exists, list_categories, CategoryRow};
pub use comments::{insert_comment, list_review_comments, CommentRow};
pub use mutations::{
    delete_by_id, delete_comment, delete_review, tweak_comment_votes, tweak_review_votes,
    tweak_votes, Target,
};
pub use reviews::{
    get_review, list_reviews, list_reviews_sql, review_exists, ReviewDetailRow, ReviewRow,
    ReviewSummaryRow,
};
pub use users::{get_user, list_users, UserRow};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIN_CONNECTIONS: u32 = 1;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// Postgres SQLSTATE for `numeric_value_out_of_range`.
const SQLSTATE_OUT_OF_RANGE: &str = "22003";
/// Postgres SQLSTATE for `invalid_text_representation`.
const SQLSTATE_INVALID_TEXT: &str = "22P02";

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        }
    }
}

/// The kind of row a lookup, tweak, or delete was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Review,
    Comment,
    User,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Review => write!(f, "review"),
            Resource::Comment => write!(f, "comment"),
            Resource::User => write!(f, "user"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0} not found")]
    NotFound(Resource),
    #[error("referenced user does not exist")]
    UserNotFound,
    #[error("category does not exist")]
    CategoryNotFound,
    #[error("value rejected by the database: {0}")]
    InvalidValue(#[source] sqlx::Error),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DbError {
    /// Classify a raw driver error, separating bad input values from
    /// everything else.
    pub(crate) fn classify(error: sqlx::Error) -> Self {
        let is_bad_value = error.as_database_error().is_some_and(|db_err| {
            matches!(
                db_err.code().as_deref(),
                Some(SQLSTATE_OUT_OF_RANGE | SQLSTATE_INVALID_TEXT)
            )
        });

        if is_bad_value {
            DbError::InvalidValue(error)
        } else {
            DbError::Sqlx(error)
        }
    }
}

/// Connect to a Postgres pool using explicit URL and config.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the connection cannot be established.
pub async fn connect_pool(database_url: &str, config: PoolConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(database_url)
        .await
}

/// Send a `SELECT 1` to verify the pool has a live connection.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// Run a full health check: ping the pool and return a typed error on failure.
///
/// # Errors
///
/// Returns [`DbError`] if the ping fails.
pub async fn health_check(pool: &PgPool) -> Result<(), DbError> {
    ping(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_config_has_sane_defaults() {
        let config = PoolConfig::default();

        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.min_connections, DEFAULT_MIN_CONNECTIONS);
        assert_eq!(config.acquire_timeout_secs, DEFAULT_ACQUIRE_TIMEOUT_SECS);
    }

    #[test]
    fn classify_leaves_non_database_errors_alone() {
        let err = DbError::classify(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Sqlx(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn resource_display_names() {
        assert_eq!(Resource::Review.to_string(), "review");
        assert_eq!(Resource::Comment.to_string(), "comment");
        assert_eq!(Resource::User.to_string(), "user");
    }
}
