//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use fifty_core::store::StoreError;
use serde_json::json;
use thiserror::Error;

/// Message for any path code that is not in the reference table.
pub const INVALID_STATE: &str = "Invalid state abbreviation parameter";

/// An error returned by an API handler.
///
/// `BadRequest` and `NotFound` are ordinary client outcomes. `Internal`
/// carries the real cause for the log; the client only sees the action
/// that failed.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("server error {action}: {source}")]
  Internal {
    /// What the handler was doing, e.g. `"fetching states"`.
    action: &'static str,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  pub fn invalid_state() -> Self { Self::NotFound(INVALID_STATE.to_owned()) }

  pub fn internal<E>(action: &'static str, err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Internal { action, source: Box::new(err) }
  }

  /// Map a store failure, turning domain rejections into 404s that name
  /// `state_name`.
  pub fn from_store<E: StoreError>(
    action: &'static str,
    state_name: &str,
    err: E,
  ) -> Self {
    match err.as_core() {
      Some(fifty_core::Error::NoFunFacts(_)) => {
        Self::NotFound(format!("No Fun Facts found for {state_name}"))
      }
      Some(fifty_core::Error::IndexOutOfRange { .. }) => Self::NotFound(format!(
        "No Fun Fact found at that index for {state_name}"
      )),
      _ => Self::internal(action, err),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::Internal { action, source } => {
        tracing::error!(error = %source, "server error {action}");
        (StatusCode::INTERNAL_SERVER_ERROR, format!("Server error {action}"))
      }
    };
    (status, Json(json!({ "message": message }))).into_response()
  }
}
