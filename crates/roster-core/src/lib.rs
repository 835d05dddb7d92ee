//! Core types and the pagination-and-aggregation pipeline for the roster
//! outside-collaborator audit.
//!
//! This crate has no HTTP dependencies. Upstream access goes
//! through the [`fetch::PagedFetcher`] and [`fetch::ProfileFetcher`] traits,
//! implemented by backends such as `roster-github`.
//!
//! Data flows one way:
//!
//! ```text
//! PagedFetcher → PageSequencer → Aggregator → Snapshot → ContributionReconciler
//! ```

pub mod aggregate;
pub mod error;
pub mod fetch;
pub mod model;
pub mod profile;
pub mod reconcile;
pub mod sequence;
pub mod views;

pub use aggregate::{Aggregator, aggregate};
pub use error::{Error, ErrorKind, Result};
pub use model::{Collaborator, Page, Repository, RepositoryNode, Snapshot};
pub use reconcile::{ContributionReconciler, Reconciliation};
pub use sequence::PageSequencer;
