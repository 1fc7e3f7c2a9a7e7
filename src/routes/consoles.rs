use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use crate::audit;
use crate::db;
use crate::error::AppError;
use crate::lifecycle::{self, DeleteOutcome};
use crate::models::{Console, ConsolePatch, NewConsole};
use crate::pagination::PageMeta;
use crate::query::{ConsoleQuery, ListParams};
use crate::state::SharedState;

pub async fn list(
    State(state): State<SharedState>,
    OriginalUri(uri): OriginalUri,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Query(params) = params?;
    let query = ConsoleQuery::resolve(
        &params,
        state.config.default_page_size,
        state.config.max_page_size,
    )?;

    let consoles = db::consoles::list(&state.pool, &query).await?;
    let total = db::consoles::count(&state.pool, &query).await?;
    let meta = PageMeta::new(total, query.page, query.per_page, uri.path(), uri.query());

    Ok(Json(json!({
        "meta": meta,
        "consoles": consoles,
    })))
}

pub async fn create(
    State(state): State<SharedState>,
    payload: Result<Json<NewConsole>, JsonRejection>,
) -> Result<(StatusCode, Json<Console>), AppError> {
    let Json(req) = payload?;
    let console = lifecycle::create(&state.pool, req).await?;
    Ok((StatusCode::CREATED, Json(console)))
}

pub async fn get(
    State(state): State<SharedState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Console>, AppError> {
    let Path(id) = id?;
    let console = lifecycle::get(&state.pool, id).await?;
    Ok(Json(console))
}

pub async fn update(
    State(state): State<SharedState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ConsolePatch>, JsonRejection>,
) -> Result<Json<Console>, AppError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    let console = lifecycle::update(&state.pool, id, patch).await?;
    Ok(Json(console))
}

pub async fn delete(
    State(state): State<SharedState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Path(id) = id?;
    match lifecycle::delete(&state.pool, state.config.delete_mode, id).await? {
        DeleteOutcome::Deactivated(console) => Ok(Json(json!({
            "message": "Console deactivated",
            "console": console,
        }))),
        DeleteOutcome::Removed { .. } => Ok(Json(json!({
            "message": "Console permanently deleted",
        }))),
    }
}

pub async fn audit_logs(
    State(state): State<SharedState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Path(id) = id?;
    let logs = audit::list_for_console(&state.pool, id).await?;
    Ok(Json(json!({ "auditLogs": logs })))
}
