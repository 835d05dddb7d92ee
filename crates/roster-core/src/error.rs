//! Error taxonomy for `roster-core`.
//!
//! Only three failure kinds ever leave the pipeline. Backends log upstream
//! detail themselves and map into one of these; nothing here carries upstream
//! response bodies.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  /// The paged fetch exceeded the gateway's allotted time.
  #[error("upstream timed out")]
  UpstreamTimeout,

  /// Any other non-success response from the paged or detail fetch.
  #[error("upstream fetch failed")]
  UpstreamFetchFailed,

  /// A response was missing a field required to continue.
  #[error("malformed page: missing {0}")]
  MalformedPage(&'static str),
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Error::UpstreamTimeout => ErrorKind::UpstreamTimeout,
      // A malformed page is reported exactly like a failed fetch.
      Error::UpstreamFetchFailed | Error::MalformedPage(_) => {
        ErrorKind::UpstreamFetchFailed
      }
    }
  }
}

/// The label surfaced to callers. The presentation layer turns these into
/// user-visible text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
  UpstreamTimeout,
  UpstreamFetchFailed,
}

impl ErrorKind {
  pub fn label(self) -> &'static str {
    match self {
      ErrorKind::UpstreamTimeout => "UpstreamTimeout",
      ErrorKind::UpstreamFetchFailed => "UpstreamFetchFailed",
    }
  }
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
