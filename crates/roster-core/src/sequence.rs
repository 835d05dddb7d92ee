//! [`PageSequencer`]: a lazy, forward-only walk over a [`PagedFetcher`].

use tracing::debug;

use crate::{Result, fetch::PagedFetcher, model::Page};

/// Produces successive pages until the upstream is exhausted.
///
/// Construction does no work; the first request is made on the first call to
/// [`next_page`](Self::next_page). Each instance owns its own cursor, so a new
/// sequencer always starts a fresh walk. Dropping a sequencer part-way is
/// always fine: nothing but the cursor is held between pulls.
pub struct PageSequencer<'f, F> {
  fetcher: &'f F,
  cursor:  Option<String>,
  pulls:   usize,
  done:    bool,
}

impl<'f, F: PagedFetcher> PageSequencer<'f, F> {
  pub fn new(fetcher: &'f F) -> Self {
    Self { fetcher, cursor: None, pulls: 0, done: false }
  }

  /// Number of upstream requests made so far.
  pub fn pulls(&self) -> usize { self.pulls }

  /// Pull the next page, or `None` once the sequence has terminated.
  ///
  /// The page that triggers termination (stalled cursor or empty repository
  /// list) is still returned. An upstream error ends the sequence.
  pub async fn next_page(&mut self) -> Result<Option<Page>> {
    if self.done {
      return Ok(None);
    }

    let first_pull = self.pulls == 0;
    self.pulls += 1;
    debug!(cursor = ?self.cursor, pull = self.pulls, "querying page");

    let page = match self.fetcher.fetch_page(self.cursor.as_deref()).await {
      Ok(page) => page,
      Err(e) => {
        self.done = true;
        return Err(e);
      }
    };

    if page.terminates(self.cursor.as_deref(), first_pull) {
      debug!(
        pull = self.pulls,
        repositories = page.repositories.len(),
        "page sequence exhausted"
      );
      self.done = true;
    } else {
      self.cursor = page.end_cursor.clone();
    }

    Ok(Some(page))
  }
}

#[cfg(test)]
pub(crate) mod testing {
  //! A scripted in-memory fetcher shared by the pipeline tests.

  use std::{collections::VecDeque, future::Future, sync::Mutex};

  use crate::{
    Error, Result,
    fetch::PagedFetcher,
    model::{Collaborator, CollaboratorConnection, Page, RepositoryNode},
  };

  pub struct ScriptedFetcher {
    pages: Mutex<VecDeque<Result<Page>>>,
    seen:  Mutex<Vec<Option<String>>>,
  }

  impl ScriptedFetcher {
    pub fn new(pages: Vec<Result<Page>>) -> Self {
      Self { pages: Mutex::new(pages.into()), seen: Mutex::new(Vec::new()) }
    }

    pub fn cursors(&self) -> Vec<Option<String>> {
      self.seen.lock().unwrap().clone()
    }
  }

  impl PagedFetcher for ScriptedFetcher {
    fn fetch_page<'a>(
      &'a self,
      cursor: Option<&'a str>,
    ) -> impl Future<Output = Result<Page>> + Send + 'a {
      async move {
        self.seen.lock().unwrap().push(cursor.map(str::to_owned));
        self
          .pages
          .lock()
          .unwrap()
          .pop_front()
          .unwrap_or(Err(Error::UpstreamFetchFailed))
      }
    }
  }

  pub fn collaborator(login: &str, company: Option<&str>) -> Collaborator {
    Collaborator {
      login:      login.into(),
      name:       None,
      url:        format!("https://github.com/{login}"),
      company:    company.map(Into::into),
      avatar_url: format!("https://avatars.example/{login}"),
    }
  }

  pub fn repo(name: &str, collaborators: Vec<Option<Collaborator>>) -> Option<RepositoryNode> {
    Some(RepositoryNode {
      name:          name.into(),
      url:           format!("https://github.com/acme/{name}"),
      collaborators: Some(CollaboratorConnection { nodes: Some(collaborators) }),
    })
  }

  pub fn page(end_cursor: Option<&str>, repositories: Vec<Option<RepositoryNode>>) -> Page {
    Page {
      org_id:       Some("O_acme".into()),
      prepared_on:  None,
      end_cursor:   end_cursor.map(Into::into),
      repositories,
    }
  }
}
