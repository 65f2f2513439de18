//! Performer handlers

use axum::{extract::State, Json};
use core_kernel::PerformerId;
use tracing::info;

use crate::{AppState, error::ApiError};
use crate::extract::Path;
use crate::dto::PerformerDto;
use crate::mapper;

/// Gets a performer by ID
pub async fn retrieve_performer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PerformerDto>, ApiError> {
    info!(performer_id = id, "Retrieving performer");

    let performer = state.port.get_performer(PerformerId::new(id)).await?;
    Ok(Json(mapper::performer_to_dto(&performer)))
}

/// Lists every performer
pub async fn list_performers(
    State(state): State<AppState>,
) -> Result<Json<Vec<PerformerDto>>, ApiError> {
    let performers = state.port.list_performers().await?;
    info!(count = performers.len(), "Listing performers");

    Ok(Json(performers.iter().map(mapper::performer_to_dto).collect()))
}
