use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::repository::{RepositoryError, SessionId, SessionRepository};
use super::service::{BorrowingService, BorrowingServiceError};
use crate::borrowing::{DepositInput, Jurisdiction, ProfileSubmission, ProfileViolation};

/// Router builder exposing the stateless estimate and the per-session endpoints.
pub fn borrowing_router<R>(service: Arc<BorrowingService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/estimate", post(assess_handler::<R>))
        .route("/api/v1/sessions", post(open_handler::<R>))
        .route(
            "/api/v1/sessions/:session_id",
            delete(close_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/profile",
            put(submit_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/estimate",
            get(estimate_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/schemes",
            get(schemes_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/budget",
            post(budget_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SchemesQuery {
    jurisdiction: Option<String>,
}

pub(crate) async fn assess_handler<R>(
    State(service): State<Arc<BorrowingService<R>>>,
    body: Result<Json<ProfileSubmission>, JsonRejection>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let Json(submission) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    match service.assess(submission) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn open_handler<R>(State(service): State<Arc<BorrowingService<R>>>) -> Response
where
    R: SessionRepository + 'static,
{
    match service.open_session() {
        Ok(session_id) => {
            (StatusCode::CREATED, Json(json!({ "session_id": session_id }))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<BorrowingService<R>>>,
    Path(session_id): Path<String>,
    body: Result<Json<ProfileSubmission>, JsonRejection>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let Json(submission) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    match service.submit(&SessionId(session_id), submission) {
        Ok(assessment) => (StatusCode::OK, Json(assessment.result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn estimate_handler<R>(
    State(service): State<Arc<BorrowingService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.estimate(&SessionId(session_id)) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn schemes_handler<R>(
    State(service): State<Arc<BorrowingService<R>>>,
    Path(session_id): Path<String>,
    Query(query): Query<SchemesQuery>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let jurisdiction = match query.jurisdiction.as_deref().map(str::parse::<Jurisdiction>) {
        None => None,
        Some(Ok(jurisdiction)) => Some(jurisdiction),
        Some(Err(rejected)) => {
            return error_response(ProfileViolation::UnknownJurisdiction(rejected.0).into())
        }
    };

    match service.schemes(&SessionId(session_id), jurisdiction) {
        Ok(schemes) => (StatusCode::OK, Json(schemes)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn budget_handler<R>(
    State(service): State<Arc<BorrowingService<R>>>,
    Path(session_id): Path<String>,
    body: Result<Json<DepositInput>, JsonRejection>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let Json(deposit) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    match service.budget(&SessionId(session_id), deposit) {
        Ok(budget) => (StatusCode::OK, Json(budget)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn close_handler<R>(
    State(service): State<Arc<BorrowingService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.close(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

/// HTTP status for a service failure; shared with the application-level error type.
pub fn status_for(error: &BorrowingServiceError) -> StatusCode {
    match error {
        BorrowingServiceError::Validation(_) | BorrowingServiceError::InvalidDeposit(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        BorrowingServiceError::NoProfile(_)
        | BorrowingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        BorrowingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        BorrowingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        BorrowingServiceError::Rates(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Malformed bodies share the JSON error shape of service failures.
fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": rejection.body_text(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}

fn error_response(error: BorrowingServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (status_for(&error), Json(payload)).into_response()
}
