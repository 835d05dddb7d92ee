//! GraphQL response envelopes and their conversion into core types.

use reqwest::StatusCode;
use roster_core::{
  model::{Page, RepositoryNode},
  profile::CollaboratorProfile,
};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::warn;

use crate::{Error, Result};

// ─── Envelope ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
  pub data:   Option<T>,
  #[serde(default)]
  pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
  pub message: String,
}

impl<T> GraphQlResponse<T> {
  /// Take `data`, failing only when the upstream sent none. Partial data with
  /// errors is accepted and the errors logged.
  pub fn into_data(self) -> Result<T> {
    let messages: Vec<String> = self.errors.into_iter().map(|e| e.message).collect();
    match self.data {
      Some(data) => {
        if !messages.is_empty() {
          warn!(errors = ?messages, "graphql returned partial data");
        }
        Ok(data)
      }
      None if messages.is_empty() => Err(Error::Missing("data")),
      None => Err(Error::GraphQl(messages)),
    }
  }
}

/// Check the status and decode a GraphQL response body.
pub(crate) fn decode<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T> {
  if !status.is_success() {
    return Err(Error::Status(status));
  }
  let response: GraphQlResponse<T> = serde_json::from_slice(body)?;
  response.into_data()
}

// ─── Repositories ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoriesData {
  pub organization: Option<OrganizationNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganizationNode {
  pub id:           Option<String>,
  pub repositories: Option<RepositoryConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RepositoryConnection {
  pub page_info: Option<PageInfo>,
  pub nodes:     Option<Vec<Option<RepositoryNode>>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
  pub end_cursor: Option<String>,
}

impl RepositoriesData {
  pub fn into_page(self) -> Result<Page> {
    let organization = self.organization.ok_or(Error::Missing("organization"))?;
    let org_id = organization.id.ok_or(Error::Missing("organization id"))?;
    let repositories = organization
      .repositories
      .ok_or(Error::Missing("repositories"))?;
    let page_info = repositories.page_info.ok_or(Error::Missing("endCursor"))?;
    let nodes = repositories.nodes.ok_or(Error::Missing("repositories"))?;

    Ok(Page {
      org_id:       Some(org_id),
      prepared_on:  None,
      end_cursor:   page_info.end_cursor,
      repositories: nodes,
    })
  }
}

// ─── User ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct UserData {
  pub user: Option<CollaboratorProfile>,
}
