use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryGuestRepository};
use crate::routes::with_guest_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use guest_planner::config::AppConfig;
use guest_planner::error::AppError;
use guest_planner::guests::sample::sample_drafts;
use guest_planner::guests::{GuestService, OwnerId};
use guest_planner::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

/// Owner that receives the sample list when seeding is enabled.
const DEMO_OWNER: &str = "demo";

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if args.seed_sample {
        config.planner.seed_sample = true;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryGuestRepository::default());
    if config.planner.seed_sample {
        let owner = OwnerId(DEMO_OWNER.to_string());
        match repository.seed(&owner, sample_drafts()) {
            Ok(seeded) => info!(owner = DEMO_OWNER, seeded, "sample guest list loaded"),
            Err(err) => warn!(error = %err, "could not seed sample guest list"),
        }
    }
    let guest_service = Arc::new(GuestService::new(repository));

    let app = with_guest_routes(guest_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "wedding guest planner ready");

    axum::serve(listener, app).await?;
    Ok(())
}
