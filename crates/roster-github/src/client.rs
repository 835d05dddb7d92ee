//! Async GraphQL client for the GitHub API.

use std::{future::Future, time::Duration};

use reqwest::Client;
use roster_core::{
  fetch::{PagedFetcher, ProfileFetcher},
  model::Page,
  profile::CollaboratorProfile,
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use crate::{
  Error, Result,
  query::{GET_USER_PROFILE_WITH_CONTRIBUTIONS, LIST_REPOSITORY_COLLABORATORS},
  wire::{RepositoriesData, UserData, decode},
};

const USER_AGENT: &str = concat!("roster/", env!("CARGO_PKG_VERSION"));

/// GitHub caps connection page sizes at 100.
const MAX_PAGE_SIZE: u32 = 100;

/// Connection settings for the GitHub GraphQL API.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
  #[serde(default = "default_api_url")]
  pub api_url:      String,
  /// Organization login whose repositories are audited.
  pub organization: String,
  /// Personal access token with `read:org` and `repo` scope.
  pub token:        String,
  #[serde(default = "default_page_size")]
  pub page_size:    u32,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_api_url() -> String { "https://api.github.com/graphql".to_string() }
fn default_page_size() -> u32 { MAX_PAGE_SIZE }
fn default_timeout_secs() -> u64 { 30 }

impl GitHubConfig {
  pub fn new(organization: impl Into<String>, token: impl Into<String>) -> Self {
    Self {
      api_url:      default_api_url(),
      organization: organization.into(),
      token:        token.into(),
      page_size:    default_page_size(),
      timeout_secs: default_timeout_secs(),
    }
  }

  /// Page size clamped to what the API accepts.
  pub fn effective_page_size(&self) -> u32 {
    self.page_size.clamp(1, MAX_PAGE_SIZE)
  }
}

/// Async client for the GitHub GraphQL API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GitHubClient {
  client: Client,
  config: GitHubConfig,
}

impl GitHubClient {
  pub fn new(config: GitHubConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .user_agent(USER_AGENT)
      .build()?;
    Ok(Self { client, config })
  }

  async fn query<T: DeserializeOwned>(
    &self,
    operation: &'static str,
    query: &'static str,
    variables: Value,
  ) -> Result<T> {
    let resp = self
      .client
      .post(&self.config.api_url)
      .bearer_auth(&self.config.token)
      .json(&json!({ "query": query, "variables": variables }))
      .send()
      .await?;

    let status = resp.status();
    let body = resp.bytes().await?;
    debug!(operation, %status, bytes = body.len(), "graphql response");
    decode(status, &body)
  }

  /// One page of the organization's repositories, starting after `cursor`.
  #[instrument(skip(self), fields(org = %self.config.organization))]
  pub async fn repositories_page(&self, cursor: Option<&str>) -> Result<Page> {
    let data: RepositoriesData = self
      .query(
        "ListRepositoryCollaborators",
        LIST_REPOSITORY_COLLABORATORS,
        json!({
          "org":      self.config.organization,
          "cursor":   cursor,
          "pageSize": self.config.effective_page_size(),
        }),
      )
      .await?;
    data.into_page()
  }

  /// Profile and contributions for `login` within the organization `org_id`.
  #[instrument(skip(self))]
  pub async fn user_profile(
    &self,
    org_id: &str,
    login: &str,
  ) -> Result<Option<CollaboratorProfile>> {
    let data: UserData = self
      .query(
        "GetUserProfileWithContributions",
        GET_USER_PROFILE_WITH_CONTRIBUTIONS,
        json!({ "orgId": org_id, "login": login }),
      )
      .await?;
    Ok(data.user)
  }
}

fn report(operation: &'static str, e: Error) -> roster_core::Error {
  warn!(operation, error = %e, "upstream request failed");
  e.into()
}

impl PagedFetcher for GitHubClient {
  fn fetch_page<'a>(
    &'a self,
    cursor: Option<&'a str>,
  ) -> impl Future<Output = roster_core::Result<Page>> + Send + 'a {
    async move {
      self
        .repositories_page(cursor)
        .await
        .map_err(|e| report("ListRepositoryCollaborators", e))
    }
  }
}

impl ProfileFetcher for GitHubClient {
  fn organization(&self) -> &str { &self.config.organization }

  fn fetch_profile<'a>(
    &'a self,
    org_id: &'a str,
    login: &'a str,
  ) -> impl Future<Output = roster_core::Result<Option<CollaboratorProfile>>> + Send + 'a
  {
    async move {
      self
        .user_profile(org_id, login)
        .await
        .map_err(|e| report("GetUserProfileWithContributions", e))
    }
  }
}
