//! Session cookie authentication
//!
//! Login issues an opaque token in a cookie (named by
//! [`ApiConfig::cookie_name`](crate::config::ApiConfig)); authenticated
//! handlers take a [`SessionUser`], which resolves that cookie to the user
//! currently holding the token.
//!
//! ```rust,ignore
//! async fn my_bookings(session: SessionUser) -> Result<Json<Vec<BookingDto>>, ApiError> {
//!     // session.user is the caller
//! }
//! ```

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use domain_concert::{SessionToken, User};
use tracing::warn;

use crate::error::ApiError;
use crate::AppState;

/// The authenticated caller and the token they presented
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user: User,
    pub token: SessionToken,
}

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(&state.config.cookie_name)
            .map(|cookie| SessionToken::new(cookie.value()))
            .ok_or_else(|| {
                warn!(path = %parts.uri.path(), "Request without session cookie");
                ApiError::Unauthorized
            })?;

        let user = state.port.find_user_by_session(&token).await.map_err(|e| {
            if e.is_unauthorized() {
                warn!(path = %parts.uri.path(), "Unknown session token");
            }
            ApiError::from(e)
        })?;

        Ok(Self { user, token })
    }
}

/// Builds the session cookie carrying `token`
pub fn session_cookie(name: &str, token: &SessionToken) -> Cookie<'static> {
    Cookie::build((name.to_owned(), token.as_str().to_owned()))
        .path("/")
        .http_only(true)
        .build()
}
