//! Contribution-detail records for a single collaborator.
//!
//! These mirror the upstream user query and tolerate `null` at every list
//! position, since the upstream may redact entries it cannot show.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `{ name, owner { login } }` as attached to contributions and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
  pub name:  String,
  pub owner: Owner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
  pub login: String,
}

impl RepositoryRef {
  pub fn is_owned_by(&self, organization: &str) -> bool {
    self.owner.login == organization
  }
}

// ─── Commits ─────────────────────────────────────────────────────────────────

/// One commit-period entry: the commits a user made to a repository on one
/// day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitNode {
  pub url:          String,
  pub commit_count: u64,
  pub occurred_at:  DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitContributions {
  #[serde(default)]
  pub total_count: u64,
  pub nodes:       Option<Vec<Option<CommitNode>>>,
}

/// Commit contributions grouped under one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
  pub repository:    RepositoryRef,
  pub contributions: CommitContributions,
}

impl CommitSummary {
  pub fn commit_nodes(&self) -> Vec<CommitNode> {
    self
      .contributions
      .nodes
      .iter()
      .flatten()
      .flatten()
      .cloned()
      .collect()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
  #[serde(default)]
  pub commit_contributions_by_repository: Vec<Option<CommitSummary>>,
}

// ─── Issue comments ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRef {
  pub title: String,
  pub url:   String,
}

/// An issue comment as returned upstream. Any of the three body renderings
/// may be requested; at least one is expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCommentNode {
  pub id:         String,
  pub url:        String,
  pub body:       Option<String>,
  pub body_text:  Option<String>,
  #[serde(rename = "bodyHTML")]
  pub body_html:  Option<String>,
  pub created_at: DateTime<Utc>,
  pub repository: RepositoryRef,
  pub issue:      IssueRef,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCommentConnection {
  pub nodes: Option<Vec<Option<IssueCommentNode>>>,
}

// ─── Profile ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRef {
  pub login: String,
  pub name:  Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationConnection {
  pub nodes: Option<Vec<Option<OrganizationRef>>>,
}

/// Everything the contribution-detail provider returns for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorProfile {
  pub login:                  Option<String>,
  pub avatar_url:             String,
  pub url:                    String,
  pub company:                Option<String>,
  pub bio:                    Option<String>,
  #[serde(default)]
  pub organizations:          OrganizationConnection,
  #[serde(default)]
  pub contributions_collection: ContributionsCollection,
  #[serde(default)]
  pub issue_comments:         IssueCommentConnection,
}

impl CollaboratorProfile {
  /// Other organizations the user belongs to, nulls removed.
  pub fn organizations(&self) -> Vec<OrganizationRef> {
    self
      .organizations
      .nodes
      .iter()
      .flatten()
      .flatten()
      .cloned()
      .collect()
  }

  pub fn commit_summaries(&self) -> impl Iterator<Item = &CommitSummary> {
    self
      .contributions_collection
      .commit_contributions_by_repository
      .iter()
      .flatten()
  }

  pub fn issue_comments(&self) -> impl Iterator<Item = &IssueCommentNode> {
    self.issue_comments.nodes.iter().flatten().flatten()
  }
}
