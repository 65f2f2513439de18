//! Login handler

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use domain_concert::SessionToken;
use tracing::{info, warn};

use crate::{AppState, error::ApiError};
use crate::auth::session_cookie;
use crate::dto::{LoginRequest, UserDto};
use crate::extract::JsonBody;
use crate::mapper;

/// Authenticates a user and starts a new session
///
/// On success the user's previous session token is replaced by a fresh one,
/// which is returned in the session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<(CookieJar, Json<UserDto>), ApiError> {
    let credentials = mapper::login_to_credentials(request);
    let token = SessionToken::generate();

    let user = state
        .port
        .start_session(&credentials, &token)
        .await
        .map_err(|e| {
            if e.is_unauthorized() {
                warn!(username = %credentials.username, "Login rejected");
            }
            ApiError::from(e)
        })?;

    info!(user_id = %user.id, "User logged in");

    let jar = jar.add(session_cookie(&state.config.cookie_name, &token));
    Ok((jar, Json(mapper::user_to_dto(&user))))
}
