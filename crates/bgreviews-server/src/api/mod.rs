mod categories;
mod comments;
mod extract;
mod reviews;
mod users;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderName, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use bgreviews_core::ValidationError;
use bgreviews_db::{DbError, Resource};
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

const ENDPOINTS_DOCUMENT: &str = include_str!("../../endpoints.json");

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

// ---------------------------------------------------------------------------
// Error translation
// ---------------------------------------------------------------------------

/// Every failure a handler can surface, each with a fixed status and message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    InvalidDataType,
    BadSort,
    BadOrder,
    MissingField(&'static str),
    NotFound(Resource),
    UserNotFound,
    CategoryNotFound,
    RouteNotFound,
    Internal,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    msg: &'static str,
}

impl ApiError {
    #[must_use]
    pub fn status(self) -> StatusCode {
        match self {
            ApiError::InvalidDataType
            | ApiError::BadSort
            | ApiError::BadOrder
            | ApiError::MissingField(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_)
            | ApiError::UserNotFound
            | ApiError::CategoryNotFound
            | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ApiError::InvalidDataType => {
                "Invalid Data Type - provided input is not an authorised data type"
            }
            ApiError::BadSort => "Bad Request - sort_by statement is provided incorrectly",
            ApiError::BadOrder => "Bad Request - order statement is provided incorrectly",
            ApiError::MissingField("inc_votes") => "Bad Request - inc_votes has not been provided",
            ApiError::MissingField(_) => {
                "Bad Request - required field (username or body) has not been provided"
            }
            ApiError::NotFound(Resource::Review) => "Not Found - review_id provided is non-existent",
            ApiError::NotFound(Resource::Comment) => {
                "Not Found - comment_id provided is non-existent"
            }
            ApiError::NotFound(Resource::User) => "Not Found - username provided is non-existent",
            ApiError::UserNotFound => {
                "Not Found - username provided in post request is non-existent"
            }
            ApiError::CategoryNotFound => "Not Found - category provided is non-existent",
            ApiError::RouteNotFound => "Invalid URL - incorrect path provided",
            ApiError::Internal => "Internal Server Error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorBody {
                msg: self.message(),
            }),
        )
            .into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::InvalidDataType => ApiError::InvalidDataType,
            ValidationError::BadSort => ApiError::BadSort,
            ValidationError::BadOrder => ApiError::BadOrder,
            ValidationError::MissingField(field) => ApiError::MissingField(field),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(error: DbError) -> Self {
        match error {
            DbError::NotFound(resource) => ApiError::NotFound(resource),
            DbError::UserNotFound => ApiError::UserNotFound,
            DbError::CategoryNotFound => ApiError::CategoryNotFound,
            DbError::InvalidValue(source) => {
                tracing::debug!(error = %source, "database rejected input value");
                ApiError::InvalidDataType
            }
            DbError::Sqlx(source) => {
                tracing::error!(error = %source, "database query failed");
                ApiError::Internal
            }
        }
    }
}

/// Parse a request body that must be a JSON object.
///
/// An empty body counts as `{}` so that field checks report what is missing.
pub(super) fn json_object(bytes: &Bytes) -> Result<Value, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(value @ Value::Object(_)) => Ok(value),
        _ => Err(ApiError::InvalidDataType),
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api", get(endpoints))
        .route("/api/health", get(health))
        .route("/api/categories", get(categories::list_categories))
        .route("/api/reviews", get(reviews::list_reviews))
        .route(
            "/api/reviews/{review_id}",
            get(reviews::get_review)
                .patch(reviews::patch_review_votes)
                .delete(reviews::delete_review),
        )
        .route(
            "/api/reviews/{review_id}/comments",
            get(comments::list_review_comments).post(comments::post_review_comment),
        )
        .route(
            "/api/comments/{comment_id}",
            patch(comments::patch_comment_votes).delete(comments::delete_comment),
        )
        .route("/api/users", get(users::list_users))
        .route("/api/users/{username}", get(users::get_user))
}

pub fn build_app(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
        let id = req
            .extensions()
            .get::<RequestId>()
            .map_or("-", |id| id.0.as_str());
        tracing::info_span!(
            "http_request",
            method = %req.method(),
            uri = %req.uri(),
            request_id = id,
        )
    });

    api_router()
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(trace)
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

async fn endpoints() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        ENDPOINTS_DOCUMENT,
    )
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match bgreviews_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}
