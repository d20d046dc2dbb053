//! Single-statement writes shared by reviews and comments.
//!
//! Both tables carry a `votes` counter and are deleted by primary key, so one
//! implementation serves both, parametrized by [`Target`]. Table and column
//! names come from the enum, never from the caller.

use sqlx::{postgres::PgRow, FromRow, PgPool};

use crate::{
    comments::{CommentRow, COMMENT_COLUMNS},
    reviews::{ReviewRow, REVIEW_COLUMNS},
    DbError, Resource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Review,
    Comment,
}

impl Target {
    fn table(self) -> &'static str {
        match self {
            Target::Review => "reviews",
            Target::Comment => "comments",
        }
    }

    fn id_column(self) -> &'static str {
        match self {
            Target::Review => "review_id",
            Target::Comment => "comment_id",
        }
    }

    fn returning(self) -> &'static str {
        match self {
            Target::Review => REVIEW_COLUMNS,
            Target::Comment => COMMENT_COLUMNS,
        }
    }

    #[must_use]
    pub fn resource(self) -> Resource {
        match self {
            Target::Review => Resource::Review,
            Target::Comment => Resource::Comment,
        }
    }
}

fn tweak_votes_sql(target: Target) -> String {
    format!(
        "UPDATE {table} \
         SET votes = votes + $1 \
         WHERE {id} = $2 \
         RETURNING {columns}",
        table = target.table(),
        id = target.id_column(),
        columns = target.returning(),
    )
}

fn delete_sql(target: Target) -> String {
    format!(
        "DELETE FROM {table} WHERE {id} = $1",
        table = target.table(),
        id = target.id_column(),
    )
}

/// Adds `delta` to the row's `votes` in one atomic `UPDATE … RETURNING`.
///
/// The increment happens inside the database, so concurrent tweaks never
/// lose updates. `delta` may be negative and votes may drop below zero.
///
/// # Errors
///
/// - [`DbError::NotFound`] if no row has this id.
/// - [`DbError::InvalidValue`] if the new total overflows the column.
/// - [`DbError::Sqlx`] for any other failure.
pub async fn tweak_votes<T>(pool: &PgPool, target: Target, id: i64, delta: i32) -> Result<T, DbError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let sql = tweak_votes_sql(target);
    sqlx::query_as::<_, T>(&sql)
        .bind(delta)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(DbError::classify)?
        .ok_or(DbError::NotFound(target.resource()))
}

/// Adjusts a review's votes and returns the updated review.
///
/// # Errors
///
/// See [`tweak_votes`].
pub async fn tweak_review_votes(
    pool: &PgPool,
    review_id: i64,
    delta: i32,
) -> Result<ReviewRow, DbError> {
    tweak_votes(pool, Target::Review, review_id, delta).await
}

/// Adjusts a comment's votes and returns the updated comment.
///
/// # Errors
///
/// See [`tweak_votes`].
pub async fn tweak_comment_votes(
    pool: &PgPool,
    comment_id: i64,
    delta: i32,
) -> Result<CommentRow, DbError> {
    tweak_votes(pool, Target::Comment, comment_id, delta).await
}

/// Deletes one row by primary key.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] when nothing was deleted, or
/// [`DbError::Sqlx`] if the statement fails.
pub async fn delete_by_id(pool: &PgPool, target: Target, id: i64) -> Result<(), DbError> {
    let sql = delete_sql(target);
    let result = sqlx::query(&sql).bind(id).execute(pool).await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound(target.resource()));
    }

    tracing::info!(table = target.table(), id, "row deleted");
    Ok(())
}

/// Deletes a comment.
///
/// # Errors
///
/// See [`delete_by_id`].
pub async fn delete_comment(pool: &PgPool, comment_id: i64) -> Result<(), DbError> {
    delete_by_id(pool, Target::Comment, comment_id).await
}

/// Deletes a review; its comments go with it via `ON DELETE CASCADE`.
///
/// # Errors
///
/// See [`delete_by_id`].
pub async fn delete_review(pool: &PgPool, review_id: i64) -> Result<(), DbError> {
    delete_by_id(pool, Target::Review, review_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tweak_sql_increments_in_place() {
        let sql = tweak_votes_sql(Target::Comment);
        assert!(sql.starts_with("UPDATE comments SET votes = votes + $1 WHERE comment_id = $2"));
        assert!(sql.ends_with(COMMENT_COLUMNS));
    }

    #[test]
    fn tweak_sql_targets_reviews() {
        let sql = tweak_votes_sql(Target::Review);
        assert!(sql.starts_with("UPDATE reviews SET votes = votes + $1 WHERE review_id = $2"));
        assert!(sql.contains("review_body"));
        assert!(!sql.contains("comment_count"));
    }

    #[test]
    fn delete_sql_uses_primary_key() {
        assert_eq!(
            delete_sql(Target::Review),
            "DELETE FROM reviews WHERE review_id = $1"
        );
        assert_eq!(
            delete_sql(Target::Comment),
            "DELETE FROM comments WHERE comment_id = $1"
        );
    }

    #[test]
    fn targets_map_to_resources() {
        assert_eq!(Target::Review.resource(), Resource::Review);
        assert_eq!(Target::Comment.resource(), Resource::Comment);
    }
}
