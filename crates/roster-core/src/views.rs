//! Read-only projections of a [`Snapshot`] for the by-user and by-repo
//! listings.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Collaborator, Repository, Snapshot};

/// A repository reference as shown in a collaborator row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoLink {
  pub name: String,
  pub url:  String,
}

impl From<&Repository> for RepoLink {
  fn from(r: &Repository) -> Self {
    Self { name: r.name.clone(), url: r.url.clone() }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
  #[serde(flatten)]
  pub collaborator: Collaborator,
  pub repos:        Vec<RepoLink>,
}

/// A collaborator reference as shown in a repository row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorLink {
  pub login:      String,
  pub url:        String,
  pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoRow {
  pub name:          String,
  pub url:           String,
  pub collaborators: Vec<CollaboratorLink>,
}

/// "N outside collaborators across M repos as of DATE".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
  pub org_id:             String,
  pub prepared_on:        DateTime<Utc>,
  pub collaborator_count: usize,
  pub repo_count:         usize,
}

impl Snapshot {
  /// One row per collaborator, ordered by login.
  pub fn by_user(&self) -> Vec<UserRow> {
    self
      .collaborators_repos
      .iter()
      .filter_map(|(login, names)| {
        let collaborator = self.collaborators.get(login)?.clone();
        let repos = names
          .iter()
          .filter_map(|n| self.repos.get(n))
          .map(RepoLink::from)
          .collect();
        Some(UserRow { collaborator, repos })
      })
      .collect()
  }

  /// One row per repository, ordered by name, listing its collaborators by
  /// login.
  pub fn by_repo(&self) -> Vec<RepoRow> {
    let mut rows: Vec<RepoRow> = self
      .repos
      .values()
      .map(|r| RepoRow {
        name:          r.name.clone(),
        url:           r.url.clone(),
        collaborators: Vec::new(),
      })
      .collect();

    // Memberships are keyed by login in order, so each row fills sorted.
    for (login, names) in &self.collaborators_repos {
      let Some(c) = self.collaborators.get(login) else { continue };
      for name in names {
        if let Ok(i) = rows.binary_search_by(|row| row.name.as_str().cmp(name.as_str())) {
          rows[i].collaborators.push(CollaboratorLink {
            login:      c.login.clone(),
            url:        c.url.clone(),
            avatar_url: c.avatar_url.clone(),
          });
        }
      }
    }
    rows
  }

  pub fn summary(&self) -> Summary {
    Summary {
      org_id:             self.org_id.clone(),
      prepared_on:        self.prepared_on,
      collaborator_count: self.collaborators.len(),
      repo_count:         self.repos.len(),
    }
  }
}
