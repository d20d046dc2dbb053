use axum::{
    extract::State,
    Json,
};
use bgreviews_db::UserRow;
use serde::Serialize;

use super::{extract::ApiPath, ApiError, AppState};

#[derive(Debug, Serialize)]
pub(super) struct UserItem {
    username: String,
    name: String,
    avatar_url: String,
}

impl From<UserRow> for UserItem {
    fn from(row: UserRow) -> Self {
        Self {
            username: row.username,
            name: row.name,
            avatar_url: row.avatar_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct UsersResponse {
    users: Vec<UserItem>,
}

#[derive(Debug, Serialize)]
pub(super) struct UserResponse {
    user: UserItem,
}

pub(super) async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<UsersResponse>, ApiError> {
    let rows = bgreviews_db::list_users(&state.pool).await?;
    Ok(Json(UsersResponse {
        users: rows.into_iter().map(UserItem::from).collect(),
    }))
}

pub(super) async fn get_user(
    State(state): State<AppState>,
    ApiPath(username): ApiPath<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let row = bgreviews_db::get_user(&state.pool, &username).await?;
    Ok(Json(UserResponse { user: row.into() }))
}
