//! HTTP routes of the record service.
//!
//! Every handler that looks a record up and changes it does both under a single write-lock
//! acquisition, so concurrent requests cannot interleave between the lookup and the change.

use crate::dataset::{position_of, Dataset, Row};
use api_shared::{HealthRes, HealthService, MessageRes, RecordRes, RecordRow};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const SERVICE_NAME: &str = "NAMASTE record service";
const NOT_FOUND_MESSAGE: &str = "Not found";

/// Application state shared by the record handlers.
#[derive(Clone)]
struct AppState {
    records: Dataset,
}

type NotFound = (StatusCode, Json<MessageRes>);

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_records,
        get_record,
        create_record,
        update_record,
        delete_record,
    ),
    components(schemas(HealthRes, MessageRes, RecordRes, RecordRow))
)]
pub struct ApiDoc;

/// Build the record service router over `records`.
pub fn router(records: Dataset) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/records", get(list_records).post(create_record))
        .route(
            "/records/:id",
            get(get_record).put(update_record).delete(delete_record),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState { records })
}

fn not_found(id: &str) -> NotFound {
    tracing::debug!("no record with id {}", id);
    (
        StatusCode::NOT_FOUND,
        Json(MessageRes::new(NOT_FOUND_MESSAGE)),
    )
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health(SERVICE_NAME))
}

#[utoipa::path(
    get,
    path = "/records",
    responses(
        (status = 200, description = "Every record, in load order", body = [RecordRow])
    )
)]
async fn list_records(State(state): State<AppState>) -> Json<Vec<Row>> {
    Json(state.records.read().await.clone())
}

#[utoipa::path(
    get,
    path = "/records/{id}",
    params(("id" = String, Path, description = "NAMC_ID of the record")),
    responses(
        (status = 200, description = "The first record with this id", body = RecordRow),
        (status = 404, description = "No record has this id", body = MessageRes)
    )
)]
async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Row>, NotFound> {
    let records = state.records.read().await;
    match position_of(&records, &id) {
        Some(index) => Ok(Json(records[index].clone())),
        None => Err(not_found(&id)),
    }
}

/// Append the body verbatim. No field is required, including `NAMC_ID`.
#[utoipa::path(
    post,
    path = "/records",
    request_body = RecordRow,
    responses(
        (status = 201, description = "Record added", body = RecordRes),
        (status = 400, description = "Body is not valid JSON"),
        (status = 422, description = "Body is not a JSON object")
    )
)]
async fn create_record(
    State(state): State<AppState>,
    Json(body): Json<RecordRow>,
) -> (StatusCode, Json<RecordRes>) {
    state.records.write().await.push(body.0.clone());
    tracing::info!("record added");
    (
        StatusCode::CREATED,
        Json(RecordRes::new("Record added", body)),
    )
}

/// Shallow-merge the body onto the first matching record.
#[utoipa::path(
    put,
    path = "/records/{id}",
    params(("id" = String, Path, description = "NAMC_ID of the record")),
    request_body = RecordRow,
    responses(
        (status = 200, description = "Record updated", body = RecordRes),
        (status = 404, description = "No record has this id", body = MessageRes)
    )
)]
async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RecordRow>,
) -> Result<Json<RecordRes>, NotFound> {
    let mut records = state.records.write().await;
    let Some(index) = position_of(&records, &id) else {
        return Err(not_found(&id));
    };

    let record = &mut records[index];
    for (key, value) in body.0 {
        record.insert(key, value);
    }

    tracing::info!("record {} updated", id);
    Ok(Json(RecordRes::new(
        "Record updated",
        RecordRow(record.clone()),
    )))
}

#[utoipa::path(
    delete,
    path = "/records/{id}",
    params(("id" = String, Path, description = "NAMC_ID of the record")),
    responses(
        (status = 200, description = "Record deleted", body = RecordRes),
        (status = 404, description = "No record has this id", body = MessageRes)
    )
)]
async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecordRes>, NotFound> {
    let mut records = state.records.write().await;
    let Some(index) = position_of(&records, &id) else {
        return Err(not_found(&id));
    };

    let removed = records.remove(index);
    tracing::info!("record {} deleted", id);
    Ok(Json(RecordRes::new("Record deleted", RecordRow(removed))))
}
