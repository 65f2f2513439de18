//! Request extractors that reject with [`ApiError`]
//!
//! axum's own `Path`, `Json` and `Query` reject with plain-text bodies. These
//! wrappers route the rejection through `ApiError` so a malformed request gets
//! the same `{"error", "message"}` body as every other failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// Path parameters, e.g. `Path(id): Path<i64>`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

/// Query string parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

/// A JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
