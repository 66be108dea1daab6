use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::domain::{GuestDraft, GuestId, OwnerId};
use super::export::export_file_name;
use super::listing::{CategoryFilter, SortKey};
use super::report::StatisticsError;
use super::repository::{GuestRepository, RepositoryError};
use super::service::{GuestService, GuestServiceError};

/// Header carrying the authenticated owner identity.
pub const OWNER_HEADER: &str = "x-owner-id";

/// Router builder exposing guest CRUD plus the listing, statistics, and export views.
pub fn guest_router<R>(service: Arc<GuestService<R>>) -> Router
where
    R: GuestRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/guests",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route("/api/v1/guests/statistics", get(statistics_handler::<R>))
        .route("/api/v1/guests/export", get(export_handler::<R>))
        .route(
            "/api/v1/guests/:guest_id",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route(
            "/api/v1/guests/:guest_id/confirmation",
            post(confirmation_handler::<R>),
        )
        .route(
            "/api/v1/guests/:guest_id/invite",
            post(invite_handler::<R>),
        )
        .with_state(service)
}

pub(crate) fn owner_from_headers(headers: &HeaderMap) -> Option<OwnerId> {
    headers
        .get(OWNER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| OwnerId(value.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListingParams {
    #[serde(default)]
    pub(crate) category: Option<String>,
    #[serde(default)]
    pub(crate) search: Option<String>,
    #[serde(default)]
    pub(crate) sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConfirmationRequest {
    pub(crate) confirmation: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InviteRequest {
    pub(crate) invite_sent: bool,
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<GuestService<R>>>,
    headers: HeaderMap,
    Query(params): Query<ListingParams>,
) -> Response
where
    R: GuestRepository + 'static,
{
    let filter = match params.category.as_deref().map(str::parse::<CategoryFilter>) {
        Some(Ok(filter)) => filter,
        Some(Err(err)) => return unprocessable(err.to_string()),
        None => CategoryFilter::All,
    };
    let sort = match params.sort.as_deref().map(str::parse::<SortKey>) {
        Some(Ok(sort)) => sort,
        Some(Err(err)) => return unprocessable(err.to_string()),
        None => SortKey::default(),
    };
    let search = params.search.unwrap_or_default();

    let owner = owner_from_headers(&headers);
    match service.listing(owner.as_ref(), filter, &search, sort) {
        Ok(listing) => (StatusCode::OK, Json(listing)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<GuestService<R>>>,
    headers: HeaderMap,
    Path(guest_id): Path<String>,
) -> Response
where
    R: GuestRepository + 'static,
{
    let owner = owner_from_headers(&headers);
    match service.get(owner.as_ref(), &GuestId(guest_id)) {
        Ok(guest) => (StatusCode::OK, Json(guest)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<GuestService<R>>>,
    headers: HeaderMap,
    Json(draft): Json<GuestDraft>,
) -> Response
where
    R: GuestRepository + 'static,
{
    let owner = owner_from_headers(&headers);
    match service.create(owner.as_ref(), draft) {
        Ok(guest) => {
            info!(guest_id = %guest.id(), grade = %guest.final_grade(), "guest created");
            (StatusCode::CREATED, Json(guest)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<GuestService<R>>>,
    headers: HeaderMap,
    Path(guest_id): Path<String>,
    Json(draft): Json<GuestDraft>,
) -> Response
where
    R: GuestRepository + 'static,
{
    let owner = owner_from_headers(&headers);
    match service.update(owner.as_ref(), &GuestId(guest_id), draft) {
        Ok(guest) => (StatusCode::OK, Json(guest)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<GuestService<R>>>,
    headers: HeaderMap,
    Path(guest_id): Path<String>,
) -> Response
where
    R: GuestRepository + 'static,
{
    let owner = owner_from_headers(&headers);
    let id = GuestId(guest_id);
    match service.delete(owner.as_ref(), &id) {
        Ok(()) => {
            info!(guest_id = %id, "guest deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn confirmation_handler<R>(
    State(service): State<Arc<GuestService<R>>>,
    headers: HeaderMap,
    Path(guest_id): Path<String>,
    Json(request): Json<ConfirmationRequest>,
) -> Response
where
    R: GuestRepository + 'static,
{
    let owner = owner_from_headers(&headers);
    match service.set_confirmation(owner.as_ref(), &GuestId(guest_id), request.confirmation) {
        Ok(guest) => (StatusCode::OK, Json(guest)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn invite_handler<R>(
    State(service): State<Arc<GuestService<R>>>,
    headers: HeaderMap,
    Path(guest_id): Path<String>,
    Json(request): Json<InviteRequest>,
) -> Response
where
    R: GuestRepository + 'static,
{
    let owner = owner_from_headers(&headers);
    match service.set_invite_sent(owner.as_ref(), &GuestId(guest_id), request.invite_sent) {
        Ok(guest) => (StatusCode::OK, Json(guest)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn statistics_handler<R>(
    State(service): State<Arc<GuestService<R>>>,
    headers: HeaderMap,
) -> Response
where
    R: GuestRepository + 'static,
{
    let owner = owner_from_headers(&headers);
    match service.statistics(owner.as_ref()) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn export_handler<R>(
    State(service): State<Arc<GuestService<R>>>,
    headers: HeaderMap,
) -> Response
where
    R: GuestRepository + 'static,
{
    let owner = owner_from_headers(&headers);
    let table = match service.export_table(owner.as_ref()) {
        Ok(table) => table,
        Err(err) => return error_response(err),
    };

    let body = match table.to_csv_bytes() {
        Ok(body) => body,
        Err(err) => {
            warn!(error = %err, "guest export failed");
            let payload = json!({ "error": err.to_string() });
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response();
        }
    };

    let file_name = export_file_name(Local::now().date_naive());
    let disposition = format!("attachment; filename=\"{file_name}\"");
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

fn unprocessable(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}

pub(crate) fn error_response(err: GuestServiceError) -> Response {
    let status = match &err {
        GuestServiceError::Unauthenticated => StatusCode::UNAUTHORIZED,
        GuestServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        GuestServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        GuestServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        GuestServiceError::Statistics(StatisticsError::Empty) => StatusCode::NOT_FOUND,
        GuestServiceError::Repository(RepositoryError::Unavailable(_)) => {
            warn!(error = %err, "guest store unavailable");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
