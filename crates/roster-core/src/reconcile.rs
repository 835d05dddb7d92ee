//! [`ContributionReconciler`]: merges one collaborator's commit summaries and
//! issue comments into per-repository activity records.
//!
//! Only repositories in the collaborator's membership set ever get a record.
//! Contributions to other organizations, or to repositories reached through
//! some other access path, are dropped rather than merged.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::{
  model::{Repository, Snapshot},
  profile::{
    CollaboratorProfile, CommitNode, CommitSummary, IssueCommentNode,
    OrganizationRef,
  },
};

// ─── Output records ──────────────────────────────────────────────────────────

/// An issue comment flattened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueComment {
  pub id:          String,
  pub url:         String,
  pub body:        String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub body_html:   Option<String>,
  pub created_at:  DateTime<Utc>,
  pub issue_title: String,
  pub issue_url:   String,
}

impl From<&IssueCommentNode> for IssueComment {
  fn from(node: &IssueCommentNode) -> Self {
    let body = node
      .body
      .as_ref()
      .or(node.body_text.as_ref())
      .or(node.body_html.as_ref())
      .cloned()
      .unwrap_or_default();
    Self {
      id:          node.id.clone(),
      url:         node.url.clone(),
      body,
      body_html:   node.body_html.clone(),
      created_at:  node.created_at,
      issue_title: node.issue.title.clone(),
      issue_url:   node.issue.url.clone(),
    }
  }
}

/// One collaborator's activity in one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryActivity {
  pub name:          String,
  pub url:           String,
  pub commits:       Vec<CommitNode>,
  pub comments:      Vec<IssueComment>,
  /// Sum of `commitCount` over `commits`.
  pub commit_count:  u64,
  /// `commit_count` plus the number of comments.
  pub contributions: u64,
}

impl RepositoryActivity {
  fn empty(name: &str, url: String) -> Self {
    Self {
      name: name.to_owned(),
      url,
      commits: Vec::new(),
      comments: Vec::new(),
      commit_count: 0,
      contributions: 0,
    }
  }

  fn tally(&mut self) {
    self.commit_count = self.commits.iter().map(|c| c.commit_count).sum();
    self.contributions = self.commit_count + self.comments.len() as u64;
  }
}

/// The ordered per-repository breakdown plus header counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
  /// Sorted by descending number of commit buckets; ties keep membership
  /// order.
  pub repositories:         Vec<RepositoryActivity>,
  pub total_commits:        u64,
  pub total_issue_comments: usize,
}

// ─── Reconciler ──────────────────────────────────────────────────────────────

/// Reconciles raw contribution data against one organization's snapshot.
///
/// Holds only shared borrows, so any number of reconcilers may read the same
/// snapshot at once.
pub struct ContributionReconciler<'a> {
  organization: &'a str,
  repos:        &'a BTreeMap<String, Repository>,
}

impl<'a> ContributionReconciler<'a> {
  /// `organization` is the organization *login*, compared against each
  /// contribution's repository owner.
  pub fn new(organization: &'a str, snapshot: &'a Snapshot) -> Self {
    Self { organization, repos: &snapshot.repos }
  }

  pub fn reconcile<'s>(
    &self,
    login: &str,
    membership: &BTreeSet<String>,
    commit_summaries: impl IntoIterator<Item = &'s CommitSummary>,
    issue_comments: impl IntoIterator<Item = &'s IssueCommentNode>,
  ) -> Reconciliation {
    let mut buckets: Vec<RepositoryActivity> = membership
      .iter()
      .map(|name| {
        let url = self.repos.get(name).map(|r| r.url.clone()).unwrap_or_default();
        RepositoryActivity::empty(name, url)
      })
      .collect();
    let index: BTreeMap<String, usize> = buckets
      .iter()
      .enumerate()
      .map(|(i, b)| (b.name.clone(), i))
      .collect();

    for summary in commit_summaries {
      let repo = &summary.repository;
      if !repo.is_owned_by(self.organization) {
        continue;
      }
      match index.get(&repo.name) {
        Some(&i) => buckets[i].commits = summary.commit_nodes(),
        None => debug!(
          login,
          repository = %repo.name,
          "dropping commit summary outside membership"
        ),
      }
    }

    for comment in issue_comments {
      let repo = &comment.repository;
      if !repo.is_owned_by(self.organization) {
        continue;
      }
      match index.get(&repo.name) {
        Some(&i) => buckets[i].comments.push(IssueComment::from(comment)),
        None => debug!(
          login,
          repository = %repo.name,
          comment = %comment.id,
          "dropping issue comment outside membership"
        ),
      }
    }

    // `sort_by` is stable, so equal bucket counts keep membership order.
    buckets.sort_by(|a, b| b.commits.len().cmp(&a.commits.len()));

    buckets.iter_mut().for_each(RepositoryActivity::tally);
    let total_commits = buckets.iter().map(|b| b.commit_count).sum();
    let total_issue_comments = buckets.iter().map(|b| b.comments.len()).sum();

    Reconciliation { repositories: buckets, total_commits, total_issue_comments }
  }

  /// Reconcile straight from an upstream profile.
  pub fn reconcile_profile(
    &self,
    login: &str,
    membership: &BTreeSet<String>,
    profile: &CollaboratorProfile,
  ) -> Reconciliation {
    self.reconcile(
      login,
      membership,
      profile.commit_summaries(),
      profile.issue_comments(),
    )
  }
}

// ─── Drill-down ──────────────────────────────────────────────────────────────

/// Everything the per-collaborator drill-down shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorDetail {
  pub login:            String,
  pub name:             Option<String>,
  pub avatar_url:       String,
  pub url:              String,
  pub company:          Option<String>,
  pub bio:              Option<String>,
  /// Other organizations the user belongs to. Likely not exhaustive.
  pub organizations:    Vec<OrganizationRef>,
  pub repository_count: usize,
  #[serde(flatten)]
  pub activity:         Reconciliation,
}

impl CollaboratorDetail {
  /// Build the drill-down for `login`, or `None` if `login` is not an
  /// outside collaborator in `snapshot`.
  pub fn build(
    snapshot: &Snapshot,
    organization: &str,
    login: &str,
    profile: &CollaboratorProfile,
  ) -> Option<Self> {
    let membership = snapshot.memberships(login)?;
    let collaborator = snapshot.collaborators.get(login)?;
    let activity = ContributionReconciler::new(organization, snapshot)
      .reconcile_profile(login, membership, profile);

    Some(Self {
      login: login.to_owned(),
      name: collaborator.name.clone(),
      avatar_url: profile.avatar_url.clone(),
      url: profile.url.clone(),
      company: profile.company.clone(),
      bio: profile.bio.clone(),
      organizations: profile.organizations(),
      repository_count: membership.len(),
      activity,
    })
  }
}
