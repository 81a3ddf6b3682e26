use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json};
use chrono::{Local, NaiveDate};
use flock_care::care::engagement::{self, EngagementComponent, EngagementInputs, EngagementLevel};
use flock_care::care::{CareDashboard, MemberRosterImporter, SpiritualActivity};
use flock_care::error::AppError;
use flock_care::missions::applications::{
    application_router, NotificationPublisher, TripApplicationRepository, TripApplicationService,
};
use flock_care::missions::tracks::recommendation_code;
use flock_care::missions::{personalized_invitation, recommend_track};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct TrackRecommendationRequest {
    #[serde(default)]
    pub(crate) occupation: Option<String>,
    #[serde(default)]
    pub(crate) first_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TrackRecommendationResponse {
    pub(crate) track: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) track_label: Option<&'static str>,
    pub(crate) invitation: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct EngagementScoreResponse {
    pub(crate) score: u8,
    pub(crate) level: EngagementLevel,
    pub(crate) label: &'static str,
    pub(crate) components: Vec<EngagementComponent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CareDashboardRequest {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) roster_csv: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RosterSource {
    Request,
    Preloaded,
}

#[derive(Debug, Serialize)]
pub(crate) struct CareDashboardResponse {
    pub(crate) roster_source: RosterSource,
    #[serde(flatten)]
    pub(crate) dashboard: CareDashboard,
}

pub(crate) fn with_care_routes<R, N>(service: Arc<TripApplicationService<R, N>>) -> axum::Router
where
    R: TripApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    application_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/engagement/score", post(engagement_score_endpoint))
        .route("/api/v1/tracks/recommend", post(track_recommendation_endpoint))
        .route("/api/v1/care/dashboard", post(care_dashboard_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn engagement_score_endpoint(
    Json(activity): Json<SpiritualActivity>,
) -> Json<EngagementScoreResponse> {
    let result = engagement::score(&EngagementInputs::from(&activity));
    Json(EngagementScoreResponse {
        score: result.total,
        level: result.level,
        label: result.level.label(),
        components: result.components,
    })
}

pub(crate) async fn track_recommendation_endpoint(
    Json(payload): Json<TrackRecommendationRequest>,
) -> Json<TrackRecommendationResponse> {
    let track = recommend_track(payload.occupation.as_deref());
    let first_name = payload.first_name.unwrap_or_default();

    Json(TrackRecommendationResponse {
        track: recommendation_code(track),
        track_label: track.map(|track| track.label()),
        invitation: personalized_invitation(&first_name, track),
    })
}

pub(crate) async fn care_dashboard_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<CareDashboardRequest>,
) -> Result<Json<CareDashboardResponse>, AppError> {
    let CareDashboardRequest { today, roster_csv } = payload;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let (dashboard, roster_source) = match roster_csv {
        Some(csv) => {
            let members = MemberRosterImporter::from_reader(Cursor::new(csv.into_bytes()))?;
            (CareDashboard::build(&members, today), RosterSource::Request)
        }
        None => (
            CareDashboard::build(&state.roster, today),
            RosterSource::Preloaded,
        ),
    };

    debug!(members = dashboard.member_count, %today, "care dashboard built");
    Ok(Json(CareDashboardResponse {
        roster_source,
        dashboard,
    }))
}
