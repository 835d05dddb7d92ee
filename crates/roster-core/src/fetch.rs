//! The upstream seams: a paged repository fetcher and a per-user
//! contribution-detail provider.
//!
//! Both are implemented by network backends (e.g. `roster-github`). Higher
//! layers depend on these traits, not on any concrete client.

use std::future::Future;

use crate::{Result, model::Page, profile::CollaboratorProfile};

/// Performs one network call per page of the organization's repositories.
///
/// The organization is fixed when the implementor is constructed. The returned
/// future must be `Send` so the trait can back a multi-threaded axum service.
pub trait PagedFetcher: Send + Sync {
  /// Fetch the page that starts after `cursor`; `None` means "from the
  /// start".
  ///
  /// Implementations map a gateway timeout to
  /// [`Error::UpstreamTimeout`](crate::Error::UpstreamTimeout) and never retry.
  fn fetch_page<'a>(
    &'a self,
    cursor: Option<&'a str>,
  ) -> impl Future<Output = Result<Page>> + Send + 'a;
}

/// Provides one collaborator's profile, commit-contribution summaries, and
/// issue comments.
pub trait ProfileFetcher: Send + Sync {
  /// The organization login used to filter contributions.
  fn organization(&self) -> &str;

  /// Returns `None` if the upstream has no user with `login`.
  fn fetch_profile<'a>(
    &'a self,
    org_id: &'a str,
    login: &'a str,
  ) -> impl Future<Output = Result<Option<CollaboratorProfile>>> + Send + 'a;
}
