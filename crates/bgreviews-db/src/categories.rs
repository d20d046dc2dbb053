//! Database operations for the `categories` table.

use sqlx::PgPool;

use crate::DbError;

/// A row from the `categories` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryRow {
    pub slug: String,
    pub description: String,
}

/// Returns every category, ordered by slug.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<CategoryRow>, DbError> {
    let rows = sqlx::query_as::<_, CategoryRow>(
        "SELECT slug, description \
         FROM categories \
         ORDER BY slug",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns `true` if a category with this exact slug exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn category_exists(pool: &PgPool, slug: &str) -> Result<bool, DbError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM categories WHERE slug = $1)",
    )
    .bind(slug)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}
