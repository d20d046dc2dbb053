//! Review handlers: listing, detail, vote tweaks and deletion.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Json,
};
use bgreviews_core::{parse_id, parse_vote_delta, ReviewListParams};
use bgreviews_db::{ReviewDetailRow, ReviewRow, ReviewSummaryRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    extract::{ApiPath, ApiQuery},
    json_object, ApiError, AppState,
};

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(super) struct ReviewListItem {
    review_id: i64,
    title: String,
    designer: String,
    review_img_url: String,
    votes: i32,
    category: String,
    owner: String,
    created_at: DateTime<Utc>,
    comment_count: String,
}

impl From<ReviewSummaryRow> for ReviewListItem {
    fn from(row: ReviewSummaryRow) -> Self {
        Self {
            review_id: row.review_id,
            title: row.title,
            designer: row.designer,
            review_img_url: row.review_img_url,
            votes: row.votes,
            category: row.category,
            owner: row.owner,
            created_at: row.created_at,
            comment_count: row.comment_count,
        }
    }
}

/// A review as stored. Returned after a vote tweak.
#[derive(Debug, Serialize)]
pub(super) struct ReviewItem {
    review_id: i64,
    title: String,
    review_body: String,
    designer: String,
    review_img_url: String,
    votes: i32,
    category: String,
    owner: String,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for ReviewItem {
    fn from(row: ReviewRow) -> Self {
        Self {
            review_id: row.review_id,
            title: row.title,
            review_body: row.review_body,
            designer: row.designer,
            review_img_url: row.review_img_url,
            votes: row.votes,
            category: row.category,
            owner: row.owner,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ReviewDetailItem {
    #[serde(flatten)]
    review: ReviewItem,
    comment_count: String,
}

impl From<ReviewDetailRow> for ReviewDetailItem {
    fn from(row: ReviewDetailRow) -> Self {
        Self {
            review: row.review.into(),
            comment_count: row.comment_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ReviewsResponse {
    reviews: Vec<ReviewListItem>,
}

#[derive(Debug, Serialize)]
pub(super) struct ReviewResponse<T: Serialize> {
    review: T,
}

#[derive(Debug, Deserialize)]
pub(super) struct ReviewListQuery {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub category: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/reviews
pub(super) async fn list_reviews(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReviewListQuery>,
) -> Result<Json<ReviewsResponse>, ApiError> {
    let params = ReviewListParams::parse(
        query.sort_by.as_deref(),
        query.order.as_deref(),
        query.category.as_deref(),
    )?;

    let rows = bgreviews_db::list_reviews(&state.pool, &params).await?;

    Ok(Json(ReviewsResponse {
        reviews: rows.into_iter().map(ReviewListItem::from).collect(),
    }))
}

/// GET /api/reviews/{review_id}
pub(super) async fn get_review(
    State(state): State<AppState>,
    ApiPath(review_id): ApiPath<String>,
) -> Result<Json<ReviewResponse<ReviewDetailItem>>, ApiError> {
    let review_id = parse_id(&review_id)?;
    let row = bgreviews_db::get_review(&state.pool, review_id).await?;
    Ok(Json(ReviewResponse { review: row.into() }))
}

/// PATCH /api/reviews/{review_id} with `{"inc_votes": n}`.
pub(super) async fn patch_review_votes(
    State(state): State<AppState>,
    ApiPath(review_id): ApiPath<String>,
    body: Bytes,
) -> Result<Json<ReviewResponse<ReviewItem>>, ApiError> {
    let review_id = parse_id(&review_id)?;
    let delta = parse_vote_delta(&json_object(&body)?)?;

    let row = bgreviews_db::tweak_review_votes(&state.pool, review_id, delta).await?;
    Ok(Json(ReviewResponse { review: row.into() }))
}

/// DELETE /api/reviews/{review_id}; comments on the review go with it.
pub(super) async fn delete_review(
    State(state): State<AppState>,
    ApiPath(review_id): ApiPath<String>,
) -> Result<StatusCode, ApiError> {
    let review_id = parse_id(&review_id)?;
    bgreviews_db::delete_review(&state.pool, review_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
