use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryNotificationPublisher, InMemoryTripApplicationRepository};
use crate::routes::with_care_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use flock_care::care::MemberRosterImporter;
use flock_care::config::AppConfig;
use flock_care::error::AppError;
use flock_care::missions::applications::TripApplicationService;
use flock_care::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let roster = match &config.care.roster_path {
        Some(path) => {
            let members = MemberRosterImporter::from_path(path)?;
            info!(path = %path.display(), members = members.len(), "member roster preloaded");
            members
        }
        None => Vec::new(),
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        roster: Arc::new(roster),
    };

    let repository = Arc::new(InMemoryTripApplicationRepository::default());
    let notifier = Arc::new(InMemoryNotificationPublisher::default());
    let application_service = Arc::new(TripApplicationService::new(repository, notifier));

    let app = with_care_routes(application_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "flock care service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
