//! Database operations for the `comments` table.

use bgreviews_core::NewComment;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{reviews::review_exists, DbError, Resource};

pub(crate) const COMMENT_COLUMNS: &str = "comment_id, body, review_id, author, votes, created_at";

/// Foreign-key constraint names declared in the schema.
const REVIEW_FK: &str = "comments_review_id_fkey";
const AUTHOR_FK: &str = "comments_author_fkey";

/// A row from the `comments` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRow {
    pub comment_id: i64,
    pub body: String,
    pub review_id: i64,
    pub author: String,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
}

/// Returns the comments on a review, oldest id first.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the review does not exist, or
/// [`DbError::Sqlx`] if a query fails.
pub async fn list_review_comments(
    pool: &PgPool,
    review_id: i64,
) -> Result<Vec<CommentRow>, DbError> {
    let rows = sqlx::query_as::<_, CommentRow>(
        "SELECT comment_id, body, review_id, author, votes, created_at \
         FROM comments \
         WHERE review_id = $1 \
         ORDER BY comment_id",
    )
    .bind(review_id)
    .fetch_all(pool)
    .await?;

    if rows.is_empty() && !review_exists(pool, review_id).await? {
        return Err(DbError::NotFound(Resource::Review));
    }

    Ok(rows)
}

/// Inserts a comment on a review and returns the stored row.
///
/// `votes` and `created_at` take their column defaults. Missing references
/// are detected from the foreign-key violation rather than a prior lookup, so
/// the insert stays a single statement.
///
/// # Errors
///
/// - [`DbError::NotFound`] if the review does not exist.
/// - [`DbError::UserNotFound`] if the author is not a known user.
/// - [`DbError::Sqlx`] for any other failure.
pub async fn insert_comment(
    pool: &PgPool,
    review_id: i64,
    comment: &NewComment,
) -> Result<CommentRow, DbError> {
    sqlx::query_as::<_, CommentRow>(
        "INSERT INTO comments (review_id, author, body) \
         VALUES ($1, $2, $3) \
         RETURNING comment_id, body, review_id, author, votes, created_at",
    )
    .bind(review_id)
    .bind(&comment.username)
    .bind(&comment.body)
    .fetch_one(pool)
    .await
    .map_err(map_insert_error)
}

fn map_insert_error(error: sqlx::Error) -> DbError {
    let missing_reference = error
        .as_database_error()
        .filter(|db_err| db_err.is_foreign_key_violation())
        .and_then(|db_err| match db_err.constraint() {
            Some(REVIEW_FK) => Some(DbError::NotFound(Resource::Review)),
            Some(AUTHOR_FK) => Some(DbError::UserNotFound),
            _ => None,
        });

    missing_reference.unwrap_or_else(|| DbError::classify(error))
}
