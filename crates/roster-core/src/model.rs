//! Repository, collaborator, page, and snapshot types.
//!
//! Wire names are camelCase to match the upstream GraphQL schema and the JSON
//! shape handed to the presentation layer.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Records ─────────────────────────────────────────────────────────────────

/// A repository that has at least one outside collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
  pub name: String,
  pub url:  String,
}

/// A user with repository access who is not a member of the organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
  /// Unique and case-sensitive, exactly as returned upstream.
  pub login:      String,
  pub name:       Option<String>,
  pub url:        String,
  pub company:    Option<String>,
  pub avatar_url: String,
}

// ─── Pages ───────────────────────────────────────────────────────────────────

/// The nested `collaborators { nodes }` connection on a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboratorConnection {
  pub nodes: Option<Vec<Option<Collaborator>>>,
}

/// One repository entry as it appears on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryNode {
  pub name:          String,
  pub url:           String,
  pub collaborators: Option<CollaboratorConnection>,
}

impl RepositoryNode {
  /// Non-null collaborators on this entry; empty when the list is absent.
  pub fn outside_collaborators(&self) -> impl Iterator<Item = &Collaborator> {
    self
      .collaborators
      .iter()
      .filter_map(|c| c.nodes.as_ref())
      .flatten()
      .flatten()
  }

  pub fn to_repository(&self) -> Repository {
    Repository { name: self.name.clone(), url: self.url.clone() }
  }
}

/// One page returned by a [`PagedFetcher`](crate::fetch::PagedFetcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
  pub org_id:       Option<String>,
  pub prepared_on:  Option<DateTime<Utc>>,
  pub end_cursor:   Option<String>,
  pub repositories: Vec<Option<RepositoryNode>>,
}

impl Page {
  /// Whether the sequence must stop after this page.
  ///
  /// `cursor` is the cursor this page was requested with. A cursor that did
  /// not move is only a stall after the first pull, since the first request
  /// always starts from `None`.
  pub fn terminates(&self, cursor: Option<&str>, first_pull: bool) -> bool {
    if !first_pull && self.end_cursor.as_deref() == cursor {
      return true;
    }
    self.repositories.is_empty()
  }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// The immutable result of one complete pagination pass.
///
/// Invariants: every key of `collaborators_repos` is a key of
/// `collaborators`, and every name in any membership set is a key of `repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
  pub org_id:              String,
  pub prepared_on:         DateTime<Utc>,
  pub repos:               BTreeMap<String, Repository>,
  pub collaborators:       BTreeMap<String, Collaborator>,
  pub collaborators_repos: BTreeMap<String, BTreeSet<String>>,
}

impl Snapshot {
  /// Repository names `login` has access to, if `login` is a collaborator.
  pub fn memberships(&self, login: &str) -> Option<&BTreeSet<String>> {
    self.collaborators_repos.get(login)
  }
}
