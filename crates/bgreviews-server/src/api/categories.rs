use axum::{extract::State, Json};
use bgreviews_db::CategoryRow;
use serde::Serialize;

use super::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub(super) struct CategoryItem {
    slug: String,
    description: String,
}

impl From<CategoryRow> for CategoryItem {
    fn from(row: CategoryRow) -> Self {
        Self {
            slug: row.slug,
            description: row.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CategoriesResponse {
    categories: Vec<CategoryItem>,
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let rows = bgreviews_db::list_categories(&state.pool).await?;
    Ok(Json(CategoriesResponse {
        categories: rows.into_iter().map(CategoryItem::from).collect(),
    }))
}
