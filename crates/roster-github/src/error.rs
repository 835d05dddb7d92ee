//! Error type for `roster-github`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("upstream returned {0}")]
  Status(StatusCode),

  #[error("graphql errors: {}", .0.join("; "))]
  GraphQl(Vec<String>),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("response missing {0}")]
  Missing(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Collapse backend detail into the core taxonomy. A gateway timeout and a
/// client-side timeout are both reported as [`UpstreamTimeout`].
///
/// [`UpstreamTimeout`]: roster_core::Error::UpstreamTimeout
impl From<Error> for roster_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Http(e) if e.is_timeout() => roster_core::Error::UpstreamTimeout,
      Error::Status(status) if status == StatusCode::GATEWAY_TIMEOUT => {
        roster_core::Error::UpstreamTimeout
      }
      Error::Missing(field) => roster_core::Error::MalformedPage(field),
      Error::Http(_) | Error::Status(_) | Error::GraphQl(_) | Error::Json(_) => {
        roster_core::Error::UpstreamFetchFailed
      }
    }
  }
}
