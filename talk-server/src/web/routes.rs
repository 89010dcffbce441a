//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::domain::TalkPage;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/talks", get(search_talks))
        .route("/api/talks/:id", get(talk_detail))
        .route("/api/teachers", get(search_teachers))
        .route("/api/teachers/:id/talks", get(teacher_talks))
        .route("/api/retreats/:id/talks", get(retreat_talks))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search talks by free-text query.
///
/// An empty query short-circuits to an empty first page without touching
/// upstream.
async fn search_talks(
    State(state): State<AppState>,
    Query(req): Query<TalkSearchQuery>,
) -> Result<Json<TalkPage>, AppError> {
    if req.q.is_empty() {
        return Ok(Json(TalkPage {
            talks: vec![],
            page: 1,
            has_more: false,
        }));
    }

    let page = page_or_first(&req.page);
    let result = state
        .catalog
        .search_talks(&req.q, page)
        .await
        .map_err(|e| {
            tracing::error!(query = %req.q, page, error = %e, "talk search failed");
            AppError::internal("Search failed")
        })?;

    Ok(Json(result))
}

/// Search teachers by name.
///
/// Degrades silently: an empty query or any resolution failure yields an
/// empty list, never a 500.
async fn search_teachers(
    State(state): State<AppState>,
    Query(req): Query<TeacherSearchQuery>,
) -> Json<TeacherSearchResponse> {
    if req.q.is_empty() {
        return Json(TeacherSearchResponse { teachers: vec![] });
    }

    let teachers = match state.catalog.search_teachers(&req.q).await {
        Ok(teachers) => teachers,
        Err(e) => {
            tracing::error!(query = %req.q, error = %e, "teacher search failed");
            vec![]
        }
    };

    Json(TeacherSearchResponse { teachers })
}

/// One page of a teacher's talks.
async fn teacher_talks(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(req): Query<TalkListQuery>,
) -> Result<Json<TalkPage>, AppError> {
    // Parsed by hand so the 400 body matches the API contract.
    let teacher_id: u64 = id
        .parse()
        .map_err(|_| AppError::bad_request("Invalid teacher ID"))?;

    let page = page_or_first(&req.page);
    let query = (!req.q.is_empty()).then_some(req.q.as_str());

    let result = state
        .catalog
        .teacher_talks(teacher_id, page, query)
        .await
        .map_err(|e| {
            tracing::error!(teacher_id, page, error = %e, "teacher talks failed");
            AppError::internal("Failed to fetch teacher talks")
        })?;

    Ok(Json(result))
}

/// A retreat's talks, with its display title when the feed carries one.
async fn retreat_talks(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(req): Query<TalkListQuery>,
) -> Result<Response, AppError> {
    let retreat_id: u64 = id
        .parse()
        .map_err(|_| AppError::bad_request("Invalid retreat ID"))?;

    // Feeds are fetched in full; the page parameter is accepted but the
    // result is always a single page.
    let _ = page_or_first(&req.page);

    let result = state.catalog.retreat_talks(retreat_id).await.map_err(|e| {
        tracing::error!(retreat_id, error = %e, "retreat talks failed");
        AppError::internal("Failed to fetch retreat talks")
    })?;

    Ok(Json(result).into_response())
}

/// Single-talk detail.
async fn talk_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let talk_id: u64 = id
        .parse()
        .map_err(|_| AppError::bad_request("Invalid talk ID"))?;

    let detail = state.catalog.talk_detail(talk_id).await.map_err(|e| {
        tracing::error!(talk_id, error = %e, "talk detail failed");
        AppError::internal("Failed to fetch talk detail")
    })?;

    match detail {
        Some(detail) => Ok(Json(detail).into_response()),
        None => Err(AppError::not_found("Talk not found")),
    }
}

/// Application error type.
///
/// Messages are fixed API-contract strings; the underlying causes are logged
/// at the handler where the context lives.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: &'static str },
    NotFound { message: &'static str },
    Internal { message: &'static str },
}

impl AppError {
    fn bad_request(message: &'static str) -> Self {
        AppError::BadRequest { message }
    }

    fn not_found(message: &'static str) -> Self {
        AppError::NotFound { message }
    }

    fn internal(message: &'static str) -> Self {
        AppError::Internal { message }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        let body = Json(ErrorResponse {
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}
