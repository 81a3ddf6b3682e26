use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ReviewDecision, TripApplicationId, TripApplicationSubmission};
use super::repository::{NotificationPublisher, RepositoryError, TripApplicationRepository};
use super::service::{ApplicationServiceError, TripApplicationService};

/// Router builder exposing HTTP endpoints for intake and review.
pub fn application_router<R, N>(service: Arc<TripApplicationService<R, N>>) -> Router
where
    R: TripApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/missions/applications", post(submit_handler::<R, N>))
        .route(
            "/api/v1/missions/applications/:application_id",
            get(status_handler::<R, N>),
        )
        .route(
            "/api/v1/missions/applications/:application_id/review",
            post(review_handler::<R, N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewRequest {
    pub(crate) decision: ReviewDecision,
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<TripApplicationService<R, N>>>,
    axum::Json(submission): axum::Json<TripApplicationSubmission>,
) -> Response
where
    R: TripApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::ACCEPTED, axum::Json(record.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<TripApplicationService<R, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: TripApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = TripApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn review_handler<R, N>(
    State(service): State<Arc<TripApplicationService<R, N>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<ReviewRequest>,
) -> Response
where
    R: TripApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = TripApplicationId(application_id);
    match service.review(&id, request.decision) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ApplicationServiceError) -> Response {
    let status = match &err {
        ApplicationServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationServiceError::Repository(RepositoryError::Conflict)
        | ApplicationServiceError::AlreadyDecided(_) => StatusCode::CONFLICT,
        ApplicationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ApplicationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
