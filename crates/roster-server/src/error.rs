//! Error types and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use roster_core::ErrorKind;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,
  #[error("not found: {0}")]
  NotFound(String),
  #[error("upstream error: {0}")]
  Upstream(#[from] roster_core::Error),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => {
        let mut res =
          (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"roster\""),
        );
        res
      }
      Error::NotFound(msg) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
      }
      Error::Upstream(e) => {
        tracing::warn!(error = %e, "request failed upstream");
        let kind = e.kind();
        let status = match kind {
          ErrorKind::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
          ErrorKind::UpstreamFetchFailed => StatusCode::BAD_GATEWAY,
        };
        (status, Json(json!({ "error": kind.label() }))).into_response()
      }
    }
  }
}
