//! Manual sync trigger and dry-run endpoints.

use axum::{extract::State, Extension, Json};
use serde::Serialize;
use shopsync_core::{RunSummary, SyncPlan};
use shopsync_engine::SyncError;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

/// `{"status": "ok", "counts": {..}, "deleted": n, "meta": {..}}`.
#[derive(Debug, Serialize)]
pub(super) struct SyncResponse {
    status: &'static str,
    #[serde(flatten)]
    summary: RunSummary,
    meta: ResponseMeta,
}

fn map_sync_error(request_id: String, error: &SyncError) -> ApiError {
    if matches!(error, SyncError::AlreadyRunning) {
        tracing::warn!("sync trigger rejected: run already in progress");
        return ApiError::new(request_id, "conflict", error.to_string());
    }
    tracing::error!(error = %error, "sync run failed");
    ApiError::new(request_id, "sync_failed", error.to_string())
}

pub(super) async fn trigger_sync(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<SyncResponse>, ApiError> {
    tracing::info!(request_id = %req_id.0, "manual sync triggered");
    let result = state
        .sync
        .try_run()
        .await
        .map_err(|e| map_sync_error(req_id.0.clone(), &e))?;

    Ok(Json(SyncResponse {
        status: "ok",
        summary: result.summary(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn plan_sync(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<SyncPlan>>, ApiError> {
    let plan = state
        .sync
        .plan()
        .await
        .map_err(|e| map_sync_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: plan,
        meta: ResponseMeta::new(req_id.0),
    }))
}
