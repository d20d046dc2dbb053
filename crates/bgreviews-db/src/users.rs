//! Database operations for the `users` table.

use sqlx::PgPool;

use crate::{DbError, Resource};

/// A row from the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

/// Returns every user, ordered by username.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_users(pool: &PgPool) -> Result<Vec<UserRow>, DbError> {
    let rows = sqlx::query_as::<_, UserRow>(
        "SELECT username, name, avatar_url \
         FROM users \
         ORDER BY username",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns a single user by username.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no such user exists, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn get_user(pool: &PgPool, username: &str) -> Result<UserRow, DbError> {
    sqlx::query_as::<_, UserRow>(
        "SELECT username, name, avatar_url \
         FROM users \
         WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound(Resource::User))
}
