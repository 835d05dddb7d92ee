//! Snapshot listing and per-collaborator drill-down.

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use roster_core::reconcile::CollaboratorDetail;
use tracing::{debug, instrument};

use crate::{AppState, Upstream, auth::Authenticated, error::Error, etag};

/// `GET /api/collaborators`: the full snapshot, revalidated by ETag.
pub async fn snapshot<F: Upstream>(
  State(state): State<AppState<F>>,
  _auth: Authenticated,
  headers: HeaderMap,
) -> Result<Response, Error> {
  let cached = state.cache.get(state.fetcher.as_ref()).await?;
  let cache_control = format!("s-maxage={}", state.cache.ttl().as_secs());

  let fresh = headers
    .get(header::IF_NONE_MATCH)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|inm| etag::matches(inm, &cached.etag));

  let validators = [
    (header::ETAG, cached.etag.to_string()),
    (header::CACHE_CONTROL, cache_control),
  ];

  if fresh {
    debug!("snapshot not modified");
    return Ok((StatusCode::NOT_MODIFIED, validators).into_response());
  }
  Ok((validators, Json(cached.snapshot.as_ref())).into_response())
}

/// `GET /api/collaborators/{login}`: profile and reconciled contributions.
#[instrument(skip(state, _auth))]
pub async fn detail<F: Upstream>(
  State(state): State<AppState<F>>,
  _auth: Authenticated,
  Path(login): Path<String>,
) -> Result<Json<CollaboratorDetail>, Error> {
  let cached = state.cache.get(state.fetcher.as_ref()).await?;
  let snapshot = cached.snapshot.as_ref();

  // Anyone outside the snapshot is not ours to look up.
  if snapshot.memberships(&login).is_none() {
    return Err(Error::NotFound(format!("collaborator {login}")));
  }

  let profile = state
    .fetcher
    .fetch_profile(&snapshot.org_id, &login)
    .await?
    .ok_or_else(|| Error::NotFound(format!("user {login}")))?;

  CollaboratorDetail::build(
    snapshot,
    state.fetcher.organization(),
    &login,
    &profile,
  )
  .map(Json)
  .ok_or_else(|| Error::NotFound(format!("collaborator {login}")))
}
