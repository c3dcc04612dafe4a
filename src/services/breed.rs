//! Breed services - HTTP handlers for the breed resource

use crate::core::{AppError, AppState};
use crate::dtos::{BreedSearchQuery, BreedSearchResultDTO};
use crate::entities::Breed;
use crate::repositories::{BreedFilter, Create, ReadAll};
use axum::{
    extract::{
        Json, Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Every body rejection (syntax, content type, field types) is a plain 400
fn invalid_json(rejection: JsonRejection) -> AppError {
    warn!("Rejected request body: {}", rejection.body_text());
    AppError::bad_request("Invalid JSON")
}

/// Undecodable query strings (e.g. a repeated key) get the JSON error body too
fn invalid_query(rejection: QueryRejection) -> AppError {
    warn!("Rejected query string: {}", rejection.body_text());
    AppError::bad_request("Invalid query string")
}

#[instrument(skip(state))]
pub async fn list_breeds(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Breed>>, AppError> {
    debug!("Listing breeds");
    let breeds = state.breeds.read_all().await.map_err(|e| {
        error!("Failed to list breeds: {}", e);
        AppError::storage(&e)
    })?;
    info!("Returning {} breeds", breeds.len());
    Ok(Json(breeds))
}

#[instrument(skip(state, payload))]
pub async fn create_breed(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Breed>, JsonRejection>,
) -> Result<(StatusCode, Json<Breed>), AppError> {
    let Json(breed) = payload.map_err(invalid_json)?;
    let created = state.breeds.create(&breed).await.map_err(|e| {
        error!("Failed to create breed: {}", e);
        AppError::storage(&e)
    })?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state))]
pub async fn get_breed(
    State(state): State<Arc<AppState>>,
    Path(breed_id): Path<String>, // parameter from /breeds/{id}
) -> Result<Json<Breed>, AppError> {
    // invalid and unknown ids get the same answer
    let breed = state.breeds.get_by_id(&breed_id).await.map_err(|e| {
        warn!("Breed lookup failed: {}", e);
        AppError::not_found("Breed not found")
    })?;
    Ok(Json(breed))
}

#[instrument(skip(state, payload))]
pub async fn update_breed(
    State(state): State<Arc<AppState>>,
    Path(breed_id): Path<String>,
    payload: Result<Json<Breed>, JsonRejection>,
) -> Result<Json<Breed>, AppError> {
    let Json(breed) = payload.map_err(invalid_json)?;
    let updated = state
        .breeds
        .update_by_id(&breed_id, &breed)
        .await
        .map_err(|e| {
            error!("Failed to update breed: {}", e);
            AppError::storage(&e)
        })?;
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_breed(
    State(state): State<Arc<AppState>>,
    Path(breed_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.breeds.delete_by_id(&breed_id).await.map_err(|e| {
        error!("Failed to delete breed: {}", e);
        AppError::storage(&e)
    })?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn search_breeds(
    State(state): State<Arc<AppState>>,
    params: Result<Query<BreedSearchQuery>, QueryRejection>, // ?species=...&minWeight=...&maxWeight=...
) -> Result<Json<BreedSearchResultDTO>, AppError> {
    let Query(params) = params.map_err(invalid_query)?;
    let filter = BreedFilter::try_from(params)?;
    let breeds = state.breeds.search(&filter).await.map_err(|e| {
        error!("Breed search failed: {}", e);
        AppError::storage(&e)
    })?;
    Ok(Json(BreedSearchResultDTO::from(breeds)))
}
