//! Record REST API Routes
//!
//! Thin translation between HTTP and [`CacheAsideService`]: parse the
//! request, call the service, map the outcome to a status code.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use store_object::{NewRecord, Record, RecordStore};

use super::error::{ApiError, ApiResult, ErrorCode};
use crate::service::CacheAsideService;

/// Query string for `GET /data`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// `refresh=true` bypasses and rebuilds the cached snapshot
    pub refresh: Option<String>,
}

impl ListParams {
    pub fn force_refresh(&self) -> bool {
        self.refresh
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

/// Body for create and update; both fields are required
#[derive(Debug, Default, Deserialize)]
pub struct RecordPayload {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl RecordPayload {
    fn into_new_record(self) -> ApiResult<NewRecord> {
        NewRecord::from_parts(self.name, self.email)
            .map_err(|e| ApiError::validation(e.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub cache: String,
}

fn parse_id(raw: &str) -> ApiResult<i32> {
    raw.trim().parse::<i32>().map_err(|_| ApiError::invalid_id(raw))
}

fn parse_payload(payload: Result<Json<RecordPayload>, JsonRejection>) -> ApiResult<NewRecord> {
    let Json(payload) = payload.map_err(|e| ApiError::validation(e.body_text()))?;
    payload.into_new_record()
}

/// GET /data - List all records
pub async fn list_records(
    State(service): State<Arc<CacheAsideService>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Record>>> {
    let records = service.fetch_all(params.force_refresh()).await?;
    Ok(Json(records))
}

/// POST /data - Create a record
pub async fn create_record(
    State(service): State<Arc<CacheAsideService>>,
    payload: Result<Json<RecordPayload>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let data = parse_payload(payload)?;
    let record = service.create(data).await?;

    tracing::info!(id = record.id, "Record created");
    Ok((StatusCode::CREATED, "Record created"))
}

/// PUT /data/:id - Replace a record's name and email
pub async fn update_record(
    State(service): State<Arc<CacheAsideService>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<RecordPayload>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&raw_id)?;
    let data = parse_payload(payload)?;

    if !service.update(id, data).await? {
        tracing::debug!(id, "Update matched no record");
    }
    Ok((StatusCode::OK, "Record updated"))
}

/// DELETE /data/:id - Delete a record
pub async fn delete_record(
    State(service): State<Arc<CacheAsideService>>,
    Path(raw_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&raw_id)?;

    if !service.delete(id).await? {
        tracing::debug!(id, "Delete matched no record");
    }
    Ok((StatusCode::OK, "Record deleted"))
}

/// GET /health - Store reachability and cache state
pub async fn health(
    State(service): State<Arc<CacheAsideService>>,
) -> ApiResult<Json<HealthResponse>> {
    service
        .store()
        .health_check()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Health check failed");
            ApiError::from_code(ErrorCode::DatabaseError)
        })?;

    let cache = if service.cache().is_enabled() {
        "enabled"
    } else {
        "disabled"
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        cache: cache.to_string(),
    }))
}
