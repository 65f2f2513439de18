//! Seat handlers

use axum::{extract::State, Json};
use chrono::NaiveDateTime;
use domain_concert::SeatStatus;
use tracing::info;

use crate::{AppState, error::ApiError};
use crate::dto::{SeatDto, SeatQuery};
use crate::extract::{Path, Query};
use crate::mapper;

/// Lists the seats of a concert date, optionally filtered by booking status
///
/// `date` is an ISO-8601 local date-time such as `2024-03-02T20:00:00`.
pub async fn list_seats(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Query(query): Query<SeatQuery>,
) -> Result<Json<Vec<SeatDto>>, ApiError> {
    let date: NaiveDateTime = date
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("'{}' is not a valid date-time", date)))?;

    let status = match query.status.as_deref() {
        Some(status) => status
            .parse::<SeatStatus>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => SeatStatus::default(),
    };

    let seats = state.port.list_seats(date, status).await?;
    info!(date = %date, status = ?status, count = seats.len(), "Listing seats");

    Ok(Json(seats.iter().map(mapper::seat_to_dto).collect()))
}
