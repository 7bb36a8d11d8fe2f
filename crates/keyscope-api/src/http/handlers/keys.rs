//! Key endpoint handlers for the REST API.

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;

use crate::http::error::AppError;
use crate::http::extractors::query::{KeyQuery, KeysQuery, SetRequest};
use crate::http::response::{ApiResponse, DeleteData, EntriesData, KeysData, SetData, ValueData};
use crate::state::AppState;

/// GET /api/redis/keys - List keys matching `search`, up to `limit`.
pub async fn list_keys(
    State(state): State<AppState>,
    Query(query): Query<KeysQuery>,
) -> Result<Json<ApiResponse<KeysData>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let limit = query.parse_limit().map_err(AppError::Validation)?;
    let keys = state
        .console
        .list_keys(query.search(), limit)
        .await
        .map_err(AppError::during("Failed to fetch keys"))?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(KeysData { keys }, request_id, elapsed)))
}

/// GET /api/redis/entries - List keys together with their display values.
pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<KeysQuery>,
) -> Result<Json<ApiResponse<EntriesData>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let limit = query.parse_limit().map_err(AppError::Validation)?;
    let entries = state
        .console
        .list_entries(query.search(), limit)
        .await
        .map_err(AppError::during("Failed to fetch entries"))?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        EntriesData { entries },
        request_id,
        elapsed,
    )))
}

/// GET /api/redis/value - Materialize one key's value as display text.
pub async fn get_value(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<ApiResponse<ValueData>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let key = query.key();
    let value = state
        .console
        .get_value(key)
        .await
        .map_err(AppError::during("Failed to fetch value"))?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        ValueData {
            key: key.to_string(),
            value: value.display(),
        },
        request_id,
        elapsed,
    )))
}

/// POST /api/redis/set - Create or overwrite a scalar value.
pub async fn set_value(
    State(state): State<AppState>,
    body: Result<Json<SetRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SetData>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    let key = body.key.unwrap_or_default();
    let value = body.value.unwrap_or_default();

    state
        .console
        .set_value(&key, &value)
        .await
        .map_err(AppError::during("Failed to set key-value pair"))?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(SetData { key }, request_id, elapsed)))
}

/// DELETE /api/redis/delete - Delete a key.
pub async fn delete_key(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<ApiResponse<DeleteData>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let key = query.key();
    state
        .console
        .delete_key(key)
        .await
        .map_err(AppError::during("Failed to delete key"))?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        DeleteData {
            message: format!("Key '{key}' successfully deleted"),
        },
        request_id,
        elapsed,
    )))
}
