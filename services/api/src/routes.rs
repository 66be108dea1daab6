use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use guest_planner::error::AppError;
use guest_planner::guests::sample::sample_guests;
use guest_planner::guests::{
    aggregate_statistics, export_file_name, guest_router, CategoryFilter, GuestListing,
    GuestRepository, GuestService, GuestSnapshot, SortKey, StatisticsSummary,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Stateless report over an inline guest list, or the built-in sample list.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct GuestReportRequest {
    #[serde(default)]
    pub(crate) guests: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) category: Option<String>,
    #[serde(default)]
    pub(crate) search: Option<String>,
    #[serde(default)]
    pub(crate) sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GuestReportResponse {
    pub(crate) data_source: GuestDataSource,
    pub(crate) export_file_name: String,
    pub(crate) listing: GuestListing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) statistics: Option<StatisticsSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum GuestDataSource {
    Snapshot,
    Sample,
}

pub(crate) fn with_guest_routes<R>(service: Arc<GuestService<R>>) -> axum::Router
where
    R: GuestRepository + 'static,
{
    guest_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/guest-list/report",
            axum::routing::post(guest_report_endpoint),
        )
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

pub(crate) async fn guest_report_endpoint(
    Json(payload): Json<GuestReportRequest>,
) -> Result<Json<GuestReportResponse>, AppError> {
    build_guest_report(payload, Local::now().date_naive()).map(Json)
}

fn build_guest_report(
    payload: GuestReportRequest,
    today: NaiveDate,
) -> Result<GuestReportResponse, AppError> {
    let GuestReportRequest {
        guests,
        category,
        search,
        sort,
    } = payload;

    let filter = match category {
        Some(raw) => raw.parse::<CategoryFilter>()?,
        None => CategoryFilter::All,
    };
    let sort = match sort {
        Some(raw) => raw.parse::<SortKey>()?,
        None => SortKey::default(),
    };

    let (guests, data_source) = match guests {
        Some(value) => (GuestSnapshot::from_value(value)?, GuestDataSource::Snapshot),
        None => (sample_guests(), GuestDataSource::Sample),
    };

    let listing = GuestListing::build(&guests, filter, search.as_deref().unwrap_or(""), sort);
    let statistics = aggregate_statistics(&guests)
        .ok()
        .map(|statistics| statistics.summary());

    Ok(GuestReportResponse {
        data_source,
        export_file_name: export_file_name(today),
        listing,
        statistics,
    })
}
