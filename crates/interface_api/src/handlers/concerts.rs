//! Concert handlers

use axum::{extract::State, Json};
use core_kernel::ConcertId;
use tracing::info;

use crate::{AppState, error::ApiError};
use crate::extract::Path;
use crate::dto::{ConcertDto, ConcertSummaryDto};
use crate::mapper;

/// Gets a concert by ID
pub async fn retrieve_concert(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ConcertDto>, ApiError> {
    info!(concert_id = id, "Retrieving concert");

    let concert = state.port.get_concert(ConcertId::new(id)).await?;
    Ok(Json(mapper::concert_to_dto(&concert)))
}

/// Lists every concert
pub async fn list_concerts(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConcertDto>>, ApiError> {
    let concerts = state.port.list_concerts().await?;
    info!(count = concerts.len(), "Listing concerts");

    Ok(Json(concerts.iter().map(mapper::concert_to_dto).collect()))
}

/// Lists every concert as an `{id, name, imageName}` summary
pub async fn list_concert_summaries(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConcertSummaryDto>>, ApiError> {
    let concerts = state.port.list_concerts().await?;
    info!(count = concerts.len(), "Listing concert summaries");

    Ok(Json(concerts.iter().map(mapper::concert_to_summary).collect()))
}
