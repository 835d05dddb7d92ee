//! [`Aggregator`]: folds pages into the three cross-indexed maps of a
//! [`Snapshot`].

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::{
  Error, Result,
  fetch::PagedFetcher,
  model::{Collaborator, Page, Repository, Snapshot},
  sequence::PageSequencer,
};

/// Accumulates repositories, collaborators, and memberships page by page.
///
/// Folding is synchronous and first-seen wins for both repositories and
/// collaborators: a later page never overwrites an earlier record.
#[derive(Debug, Default)]
pub struct Aggregator {
  org_id:      Option<String>,
  prepared_on: Option<DateTime<Utc>>,
  repos:       BTreeMap<String, Repository>,
  collabs:     BTreeMap<String, Collaborator>,
  memberships: BTreeMap<String, BTreeSet<String>>,
  pages:       usize,
}

impl Aggregator {
  pub fn new() -> Self { Self::default() }

  /// Fold one page into the accumulated state.
  ///
  /// Null repository entries, repositories with a null or absent collaborator
  /// list, and null collaborator entries are skipped. A repository is only
  /// recorded when at least one collaborator survives that filtering.
  pub fn fold(&mut self, page: &Page) {
    self.pages += 1;
    if self.org_id.is_none() {
      self.org_id = page.org_id.clone();
    }
    if self.prepared_on.is_none() {
      self.prepared_on = page.prepared_on;
    }

    for node in page.repositories.iter().flatten() {
      let mut collaborators = node.outside_collaborators().peekable();
      if collaborators.peek().is_none() {
        continue;
      }

      self
        .repos
        .entry(node.name.clone())
        .or_insert_with(|| node.to_repository());

      for collaborator in collaborators {
        self
          .collabs
          .entry(collaborator.login.clone())
          .or_insert_with(|| collaborator.clone());
        self
          .memberships
          .entry(collaborator.login.clone())
          .or_default()
          .insert(node.name.clone());
      }
    }

    debug!(
      page = self.pages,
      repos = self.repos.len(),
      collaborators = self.collabs.len(),
      "folded page"
    );
  }

  /// Produce the snapshot, stamping it with the current time unless a page
  /// supplied a preparation timestamp.
  pub fn finish(self) -> Result<Snapshot> {
    self.finish_at(Utc::now())
  }

  pub fn finish_at(self, now: DateTime<Utc>) -> Result<Snapshot> {
    let org_id = self.org_id.ok_or(Error::MalformedPage("organization id"))?;
    Ok(Snapshot {
      org_id,
      prepared_on:         self.prepared_on.unwrap_or(now),
      repos:               self.repos,
      collaborators:       self.collabs,
      collaborators_repos: self.memberships,
    })
  }
}

/// Walk every page from `fetcher` and fold it into a [`Snapshot`].
///
/// Pages are requested strictly one at a time. Any upstream error discards
/// the partial state and is returned as-is.
#[instrument(skip_all)]
pub async fn aggregate<F: PagedFetcher>(fetcher: &F) -> Result<Snapshot> {
  let mut pages = PageSequencer::new(fetcher);
  let mut aggregator = Aggregator::new();

  while let Some(page) = pages.next_page().await? {
    aggregator.fold(&page);
  }

  let snapshot = aggregator.finish()?;
  info!(
    pages = pages.pulls(),
    repos = snapshot.repos.len(),
    collaborators = snapshot.collaborators.len(),
    "aggregation complete"
  );
  Ok(snapshot)
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::{
    model::{CollaboratorConnection, RepositoryNode},
    sequence::testing::*,
  };

  fn names<V>(map: &BTreeMap<String, V>) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
  }

  #[tokio::test]
  async fn two_page_scenario() {
    let fetcher = ScriptedFetcher::new(vec![
      Ok(page(Some("c1"), vec![repo("app", vec![Some(collaborator("bob", None))])])),
      Ok(page(Some("c2"), vec![])),
    ]);
    let snapshot = aggregate(&fetcher).await.unwrap();

    assert_eq!(fetcher.cursors().len(), 2);
    assert_eq!(snapshot.org_id, "O_acme");
    assert_eq!(names(&snapshot.repos), ["app"]);
    assert_eq!(names(&snapshot.collaborators), ["bob"]);
    assert_eq!(
      snapshot.memberships("bob").unwrap().iter().collect::<Vec<_>>(),
      ["app"]
    );
  }

  #[test]
  fn repos_without_collaborators_are_skipped() {
    let mut agg = Aggregator::new();
    agg.fold(&page(Some("c1"), vec![
      None,
      repo("empty", vec![]),
      repo("only-nulls", vec![None, None]),
      Some(RepositoryNode {
        name:          "absent".into(),
        url:           "u".into(),
        collaborators: None,
      }),
      Some(RepositoryNode {
        name:          "null-nodes".into(),
        url:           "u".into(),
        collaborators: Some(CollaboratorConnection { nodes: None }),
      }),
      repo("kept", vec![None, Some(collaborator("eve", None))]),
    ]));
    let snapshot = agg.finish().unwrap();

    assert_eq!(names(&snapshot.repos), ["kept"]);
    assert_eq!(names(&snapshot.collaborators), ["eve"]);
  }

  #[test]
  fn first_seen_collaborator_wins() {
    let mut agg = Aggregator::new();
    agg.fold(&page(Some("c1"), vec![repo("a", vec![Some(collaborator("alice", Some("A")))])]));
    agg.fold(&page(Some("c2"), vec![repo("b", vec![Some(collaborator("bob", None))])]));
    agg.fold(&page(Some("c3"), vec![repo("c", vec![Some(collaborator("alice", Some("B")))])]));
    let snapshot = agg.finish().unwrap();

    assert_eq!(snapshot.collaborators["alice"].company.as_deref(), Some("A"));
    assert_eq!(snapshot.memberships("alice").unwrap().len(), 2);
  }

  #[test]
  fn memberships_never_duplicate() {
    let mut agg = Aggregator::new();
    for cursor in ["c1", "c2", "c3"] {
      agg.fold(&page(Some(cursor), vec![
        repo("app", vec![Some(collaborator("bob", None)), Some(collaborator("bob", None))]),
      ]));
    }
    let snapshot = agg.finish().unwrap();
    assert_eq!(snapshot.memberships("bob").unwrap().len(), 1);
    assert_eq!(snapshot.repos.len(), 1);
  }

  #[test]
  fn every_membership_is_indexed() {
    let mut agg = Aggregator::new();
    agg.fold(&page(Some("c1"), vec![
      repo("a", vec![Some(collaborator("x", None)), Some(collaborator("y", None))]),
      repo("b", vec![Some(collaborator("y", None))]),
    ]));
    agg.fold(&page(Some("c2"), vec![repo("c", vec![Some(collaborator("z", None))])]));
    let snapshot = agg.finish().unwrap();

    for (login, repos) in &snapshot.collaborators_repos {
      assert!(snapshot.collaborators.contains_key(login));
      for name in repos {
        assert!(snapshot.repos.contains_key(name));
      }
    }
    assert_eq!(snapshot.collaborators_repos.len(), snapshot.collaborators.len());
  }

  #[test]
  fn metadata_comes_from_first_page_carrying_it() {
    let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let mut first = page(Some("c1"), vec![]);
    first.org_id = None;
    let mut second = page(Some("c2"), vec![]);
    second.org_id = Some("O_second".into());
    second.prepared_on = Some(stamp);
    let mut third = page(Some("c3"), vec![]);
    third.org_id = Some("O_third".into());

    let mut agg = Aggregator::new();
    for p in [&first, &second, &third] {
      agg.fold(p);
    }
    let snapshot = agg.finish_at(Utc::now()).unwrap();
    assert_eq!(snapshot.org_id, "O_second");
    assert_eq!(snapshot.prepared_on, stamp);
  }

  #[test]
  fn missing_org_id_is_malformed() {
    let mut p = page(None, vec![]);
    p.org_id = None;
    let mut agg = Aggregator::new();
    agg.fold(&p);
    assert_eq!(agg.finish(), Err(Error::MalformedPage("organization id")));
  }

  #[tokio::test]
  async fn failure_mid_sequence_discards_everything() {
    let fetcher = ScriptedFetcher::new(vec![
      Ok(page(Some("c1"), vec![repo("app", vec![Some(collaborator("bob", None))])])),
      Err(Error::UpstreamTimeout),
    ]);
    assert_eq!(aggregate(&fetcher).await, Err(Error::UpstreamTimeout));
  }

  #[tokio::test]
  async fn same_pages_produce_equal_snapshots() {
    let script = || {
      vec![
        Ok(page(Some("c1"), vec![repo("a", vec![Some(collaborator("x", None))])])),
        Ok(page(Some("c2"), vec![repo("b", vec![Some(collaborator("x", None))])])),
        Ok(page(Some("c2"), vec![])),
      ]
    };
    let mut one = aggregate(&ScriptedFetcher::new(script())).await.unwrap();
    let two = aggregate(&ScriptedFetcher::new(script())).await.unwrap();
    one.prepared_on = two.prepared_on;
    assert_eq!(one, two);
  }
}
