//! Read queries for the `reviews` table.
//!
//! `comment_count` is never stored: it is a `COUNT` over a left join against
//! `comments`, cast to text.

use bgreviews_core::{ReviewListParams, SortColumn, SortOrder};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{categories::category_exists, DbError, Resource};

pub(crate) const REVIEW_COLUMNS: &str = "review_id, title, review_body, designer, review_img_url, \
                                         votes, category, owner, created_at";

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `reviews` table as stored.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRow {
    pub review_id: i64,
    pub title: String,
    pub review_body: String,
    pub designer: String,
    pub review_img_url: String,
    pub votes: i32,
    pub category: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
}

/// A single review together with its derived comment count.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewDetailRow {
    #[sqlx(flatten)]
    pub review: ReviewRow,
    pub comment_count: String,
}

/// Listing row: every review column except the body, plus the comment count.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewSummaryRow {
    pub review_id: i64,
    pub title: String,
    pub designer: String,
    pub review_img_url: String,
    pub votes: i32,
    pub category: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub comment_count: String,
}

// ---------------------------------------------------------------------------
// Query builders
// ---------------------------------------------------------------------------

fn sort_column_sql(column: SortColumn) -> &'static str {
    match column {
        SortColumn::ReviewId => "r.review_id",
        // Byte-wise ordering, independent of the database's default collation.
        SortColumn::Title => "r.title COLLATE \"C\"",
        SortColumn::Owner => "r.owner COLLATE \"C\"",
        SortColumn::Category => "r.category COLLATE \"C\"",
        SortColumn::CreatedAt => "r.created_at",
        SortColumn::Votes => "r.votes",
        // Sort on the number, not its text form, so 10 follows 9.
        SortColumn::CommentCount => "COUNT(c.comment_id)",
    }
}

fn sort_order_sql(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    }
}

/// Build the review listing statement for a validated sort column and order.
///
/// Only code-controlled tokens are spliced into the text. The optional
/// category filter is bound as `$1`; pass `NULL` to list every category.
/// `review_id` breaks ties in the same direction as the main sort.
#[must_use]
pub fn list_reviews_sql(sort_by: SortColumn, order: SortOrder) -> String {
    let column = sort_column_sql(sort_by);
    let direction = sort_order_sql(order);
    format!(
        "SELECT \
             r.review_id, r.title, r.designer, r.review_img_url, r.votes, \
             r.category, r.owner, r.created_at, \
             COUNT(c.comment_id)::TEXT AS comment_count \
         FROM reviews r \
         LEFT JOIN comments c ON c.review_id = r.review_id \
         WHERE ($1::TEXT IS NULL OR r.category = $1) \
         GROUP BY r.review_id \
         ORDER BY {column} {direction}, r.review_id {direction}"
    )
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns reviews sorted and optionally filtered by category.
///
/// An empty result for a category is only an error when the category itself
/// does not exist; a known category with no reviews yields an empty list.
///
/// # Errors
///
/// Returns [`DbError::CategoryNotFound`] for an unknown category, or
/// [`DbError::Sqlx`] if a query fails.
pub async fn list_reviews(
    pool: &PgPool,
    params: &ReviewListParams,
) -> Result<Vec<ReviewSummaryRow>, DbError> {
    let sql = list_reviews_sql(params.sort_by, params.order);
    let rows = sqlx::query_as::<_, ReviewSummaryRow>(&sql)
        .bind(params.category.as_deref())
        .fetch_all(pool)
        .await?;

    if rows.is_empty() {
        if let Some(category) = params.category.as_deref() {
            if !category_exists(pool, category).await? {
                tracing::debug!(category, "review listing requested for unknown category");
                return Err(DbError::CategoryNotFound);
            }
        }
    }

    Ok(rows)
}

/// Returns one review with its comment count.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no review has this id, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn get_review(pool: &PgPool, review_id: i64) -> Result<ReviewDetailRow, DbError> {
    sqlx::query_as::<_, ReviewDetailRow>(
        "SELECT \
             r.review_id, r.title, r.review_body, r.designer, r.review_img_url, \
             r.votes, r.category, r.owner, r.created_at, \
             COUNT(c.comment_id)::TEXT AS comment_count \
         FROM reviews r \
         LEFT JOIN comments c ON c.review_id = r.review_id \
         WHERE r.review_id = $1 \
         GROUP BY r.review_id",
    )
    .bind(review_id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound(Resource::Review))
}

/// Returns `true` if a review with this id exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn review_exists(pool: &PgPool, review_id: i64) -> Result<bool, DbError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM reviews WHERE review_id = $1)",
    )
    .bind(review_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_sql_defaults_to_created_at_descending() {
        let sql = list_reviews_sql(SortColumn::default(), SortOrder::default());
        assert!(sql.ends_with("ORDER BY r.created_at DESC, r.review_id DESC"));
    }

    #[test]
    fn list_sql_sorts_comment_count_numerically() {
        let sql = list_reviews_sql(SortColumn::CommentCount, SortOrder::Asc);
        assert!(sql.ends_with("ORDER BY COUNT(c.comment_id) ASC, r.review_id ASC"));
    }

    #[test]
    fn list_sql_has_one_bound_parameter_for_every_column() {
        for column in SortColumn::ALL {
            for order in [SortOrder::Asc, SortOrder::Desc] {
                let sql = list_reviews_sql(column, order);
                assert!(sql.contains("($1::TEXT IS NULL OR r.category = $1)"));
                assert!(!sql.contains("$2"), "unexpected second parameter: {sql}");
                assert!(sql.contains("COUNT(c.comment_id)::TEXT AS comment_count"));
            }
        }
    }
}
