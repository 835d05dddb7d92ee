//! HTTP surface for the roster outside-collaborator audit.
//!
//! Exposes an axum [`Router`] serving the aggregated snapshot, its derived
//! views, and per-collaborator drill-downs, backed by any [`Upstream`].

pub mod auth;
pub mod cache;
pub mod error;
pub mod etag;
pub mod handlers;

pub use error::Error;

use std::{sync::Arc, time::Duration};

use axum::{Router, routing::get};
use roster_core::fetch::{PagedFetcher, ProfileFetcher};
use roster_github::GitHubConfig;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::AuthConfig;
use cache::SnapshotCache;
use handlers::{collaborators, healthz, views};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                 String,
  #[serde(default = "default_port")]
  pub port:                 u16,
  pub organization:         String,
  pub github_token:         String,
  #[serde(default = "default_api_url")]
  pub github_api_url:       String,
  #[serde(default = "default_page_size")]
  pub page_size:            u32,
  #[serde(default = "default_request_timeout_secs")]
  pub request_timeout_secs: u64,
  #[serde(default = "default_snapshot_ttl_secs")]
  pub snapshot_ttl_secs:    u64,
  pub auth_username:        String,
  pub auth_password_hash:   String,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3000 }
fn default_api_url() -> String { "https://api.github.com/graphql".to_string() }
fn default_page_size() -> u32 { 100 }
fn default_request_timeout_secs() -> u64 { 30 }
fn default_snapshot_ttl_secs() -> u64 { 600 }

impl ServerConfig {
  pub fn github(&self) -> GitHubConfig {
    GitHubConfig {
      api_url:      self.github_api_url.clone(),
      organization: self.organization.clone(),
      token:        self.github_token.clone(),
      page_size:    self.page_size,
      timeout_secs: self.request_timeout_secs,
    }
  }

  pub fn auth(&self) -> AuthConfig {
    AuthConfig {
      username:      self.auth_username.clone(),
      password_hash: self.auth_password_hash.clone(),
    }
  }

  pub fn snapshot_ttl(&self) -> Duration {
    Duration::from_secs(self.snapshot_ttl_secs)
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Everything the handlers need from upstream.
pub trait Upstream: PagedFetcher + ProfileFetcher + 'static {}

impl<T: PagedFetcher + ProfileFetcher + 'static> Upstream for T {}

/// Shared state threaded through all axum handlers.
pub struct AppState<F> {
  pub fetcher: Arc<F>,
  pub auth:    Arc<AuthConfig>,
  pub cache:   Arc<SnapshotCache>,
}

impl<F> AppState<F> {
  pub fn new(fetcher: F, config: &ServerConfig) -> Self {
    Self {
      fetcher: Arc::new(fetcher),
      auth:    Arc::new(config.auth()),
      cache:   Arc::new(SnapshotCache::new(config.snapshot_ttl())),
    }
  }
}

// Manual impl: the fetcher sits behind an `Arc` and need not be `Clone`.
impl<F> Clone for AppState<F> {
  fn clone(&self) -> Self {
    Self {
      fetcher: Arc::clone(&self.fetcher),
      auth:    Arc::clone(&self.auth),
      cache:   Arc::clone(&self.cache),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the audit server.
pub fn router<F: Upstream>(state: AppState<F>) -> Router {
  let api = Router::new()
    .route("/collaborators",         get(collaborators::snapshot::<F>))
    .route("/collaborators/{login}", get(collaborators::detail::<F>))
    .route("/views/by-user",         get(views::by_user::<F>))
    .route("/views/by-repo",         get(views::by_repo::<F>))
    .route("/summary",               get(views::summary::<F>));

  Router::new()
    .nest("/api", api)
    .route("/healthz", get(healthz))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
