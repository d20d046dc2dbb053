use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Json,
};
use bgreviews_core::{parse_id, parse_new_comment, parse_vote_delta};
use bgreviews_db::CommentRow;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{extract::ApiPath, json_object, ApiError, AppState};

/// A comment as listed under its review; `review_id` is implied by the path.
#[derive(Debug, Serialize)]
pub(super) struct ReviewCommentItem {
    comment_id: i64,
    votes: i32,
    created_at: DateTime<Utc>,
    author: String,
    body: String,
}

impl From<CommentRow> for ReviewCommentItem {
    fn from(row: CommentRow) -> Self {
        Self {
            comment_id: row.comment_id,
            votes: row.votes,
            created_at: row.created_at,
            author: row.author,
            body: row.body,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CommentItem {
    comment_id: i64,
    body: String,
    review_id: i64,
    author: String,
    votes: i32,
    created_at: DateTime<Utc>,
}

impl From<CommentRow> for CommentItem {
    fn from(row: CommentRow) -> Self {
        Self {
            comment_id: row.comment_id,
            body: row.body,
            review_id: row.review_id,
            author: row.author,
            votes: row.votes,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CommentsResponse {
    comments: Vec<ReviewCommentItem>,
}

#[derive(Debug, Serialize)]
pub(super) struct CommentResponse {
    comment: CommentItem,
}

/// GET /api/reviews/{review_id}/comments
pub(super) async fn list_review_comments(
    State(state): State<AppState>,
    ApiPath(review_id): ApiPath<String>,
) -> Result<Json<CommentsResponse>, ApiError> {
    let review_id = parse_id(&review_id)?;
    let rows = bgreviews_db::list_review_comments(&state.pool, review_id).await?;
    Ok(Json(CommentsResponse {
        comments: rows.into_iter().map(ReviewCommentItem::from).collect(),
    }))
}

/// POST /api/reviews/{review_id}/comments with `{"username", "body"}`.
pub(super) async fn post_review_comment(
    State(state): State<AppState>,
    ApiPath(review_id): ApiPath<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let review_id = parse_id(&review_id)?;
    let new_comment = parse_new_comment(&json_object(&body)?)?;

    let row = bgreviews_db::insert_comment(&state.pool, review_id, &new_comment).await?;
    tracing::info!(
        review_id,
        comment_id = row.comment_id,
        author = %row.author,
        "comment created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CommentResponse {
            comment: row.into(),
        }),
    ))
}

/// PATCH /api/comments/{comment_id} with `{"inc_votes": n}`.
pub(super) async fn patch_comment_votes(
    State(state): State<AppState>,
    ApiPath(comment_id): ApiPath<String>,
    body: Bytes,
) -> Result<Json<CommentResponse>, ApiError> {
    let comment_id = parse_id(&comment_id)?;
    let delta = parse_vote_delta(&json_object(&body)?)?;

    let row = bgreviews_db::tweak_comment_votes(&state.pool, comment_id, delta).await?;
    Ok(Json(CommentResponse {
        comment: row.into(),
    }))
}

/// DELETE /api/comments/{comment_id}
pub(super) async fn delete_comment(
    State(state): State<AppState>,
    ApiPath(comment_id): ApiPath<String>,
) -> Result<StatusCode, ApiError> {
    let comment_id = parse_id(&comment_id)?;
    bgreviews_db::delete_comment(&state.pool, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
