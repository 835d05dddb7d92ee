//! Read-only projections of the cached snapshot.

use axum::{Json, extract::State};
use roster_core::views::{RepoRow, Summary, UserRow};

use crate::{AppState, Upstream, auth::Authenticated, error::Error};

pub async fn by_user<F: Upstream>(
  State(state): State<AppState<F>>,
  _auth: Authenticated,
) -> Result<Json<Vec<UserRow>>, Error> {
  let cached = state.cache.get(state.fetcher.as_ref()).await?;
  Ok(Json(cached.snapshot.by_user()))
}

pub async fn by_repo<F: Upstream>(
  State(state): State<AppState<F>>,
  _auth: Authenticated,
) -> Result<Json<Vec<RepoRow>>, Error> {
  let cached = state.cache.get(state.fetcher.as_ref()).await?;
  Ok(Json(cached.snapshot.by_repo()))
}

pub async fn summary<F: Upstream>(
  State(state): State<AppState<F>>,
  _auth: Authenticated,
) -> Result<Json<Summary>, Error> {
  let cached = state.cache.get(state.fetcher.as_ref()).await?;
  Ok(Json(cached.snapshot.summary()))
}
