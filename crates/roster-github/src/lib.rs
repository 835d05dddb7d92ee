//! GitHub GraphQL backend for roster.
//!
//! [`GitHubClient`] implements [`roster_core::fetch::PagedFetcher`] over the
//! organization's repositories (with their outside collaborators) and
//! [`roster_core::fetch::ProfileFetcher`] over a user's contributions.

mod client;
mod query;
mod wire;

pub mod error;

pub use client::{GitHubClient, GitHubConfig};
pub use error::{Error, Result};

#[cfg(test)]
mod tests;
