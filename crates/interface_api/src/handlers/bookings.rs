//! Booking handlers
//!
//! All booking routes require a session cookie. Bookings are read-only here:
//! `POST /bookings` accepts a booking request but only returns the caller's
//! existing bookings.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use core_kernel::BookingId;
use tracing::{info, warn};

use crate::{AppState, error::ApiError};
use crate::auth::{session_cookie, SessionUser};
use crate::dto::{BookingDto, BookingRequest};
use crate::extract::Path;
use crate::mapper;

/// Returns the caller's bookings; the request body is parsed but not stored
pub async fn make_booking(
    State(state): State<AppState>,
    session: SessionUser,
    jar: CookieJar,
    request: Option<Json<BookingRequest>>,
) -> Result<(CookieJar, Json<Vec<BookingDto>>), ApiError> {
    if let Some(Json(request)) = &request {
        info!(
            user_id = %session.user.id,
            concert_id = request.concert_id,
            date = %request.date,
            seats = request.seat_labels.len(),
            "Booking request received"
        );
    }

    user_bookings(state, session, jar).await
}

/// Lists the caller's bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    session: SessionUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Vec<BookingDto>>), ApiError> {
    user_bookings(state, session, jar).await
}

/// Gets one of the caller's bookings
pub async fn retrieve_booking(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<BookingDto>, ApiError> {
    let booking = state.port.get_booking(BookingId::new(id)).await?;

    if !booking.belongs_to(session.user.id) {
        warn!(user_id = %session.user.id, booking_id = id, "Booking belongs to another user");
        return Err(ApiError::Forbidden(format!("Booking {} belongs to another user", id)));
    }

    Ok(Json(mapper::booking_to_dto(&booking)))
}

async fn user_bookings(
    state: AppState,
    session: SessionUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Vec<BookingDto>>), ApiError> {
    let bookings = state.port.list_bookings_for_user(session.user.id).await?;
    info!(user_id = %session.user.id, count = bookings.len(), "Listing bookings");

    let jar = jar.add(session_cookie(&state.config.cookie_name, &session.token));
    Ok((jar, Json(bookings.iter().map(mapper::booking_to_dto).collect())))
}
