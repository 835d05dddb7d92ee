//! HTTP Basic-auth gate in front of the audit.
//!
//! The snapshot lists every outside collaborator of the organization with
//! their repository access, so every `/api` route requires the one
//! configured auditor account. `/healthz` is the only open route.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use tracing::debug;

use crate::{AppState, Upstream, error::Error};

/// The auditor account allowed to read the roster.
#[derive(Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// argon2 PHC string, as printed by `roster --hash-password`.
  pub password_hash: String,
}

/// Extractor proving the request carried the auditor's credentials.
pub struct Authenticated;

/// Split an `Authorization: Basic …` header into username and password.
///
/// The password may itself contain `:`; only the first one separates.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
  let encoded = headers
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Basic ")?;
  let decoded = String::from_utf8(B64.decode(encoded).ok()?).ok()?;
  let (username, password) = decoded.split_once(':')?;
  Some((username.to_owned(), password.to_owned()))
}

/// Check the request's Basic credentials against the auditor account.
pub fn verify_auth(headers: &HeaderMap, config: &AuthConfig) -> Result<(), Error> {
  let Some((username, password)) = basic_credentials(headers) else {
    debug!("audit request without usable basic credentials");
    return Err(Error::Unauthorized);
  };

  if username != config.username {
    debug!(%username, "audit request for unknown account");
    return Err(Error::Unauthorized);
  }

  // A hash that does not parse is a config error; it still only ever denies.
  let parsed_hash = PasswordHash::new(&config.password_hash)
    .map_err(|_| Error::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| {
      debug!(%username, "audit request with wrong password");
      Error::Unauthorized
    })
}

impl<F: Upstream> FromRequestParts<AppState<F>> for Authenticated {
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<F>,
  ) -> Result<Self, Self::Rejection> {
    verify_auth(&parts.headers, &state.auth)?;
    Ok(Authenticated)
  }
}
