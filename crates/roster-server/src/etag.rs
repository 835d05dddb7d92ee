//! ETag computation for snapshots.
//!
//! The snapshot's maps are ordered, so its JSON encoding is stable for equal
//! content and can be hashed directly. `preparedOn` is excluded: a refresh
//! that finds nothing new keeps the same tag.

use roster_core::Snapshot;
use sha2::{Digest, Sha256};

/// Compute a quoted strong ETag for `snapshot`.
pub fn compute_etag(snapshot: &Snapshot) -> String {
  let mut hasher = Sha256::new();
  hasher.update(snapshot.org_id.as_bytes());
  for part in [
    serde_json::to_vec(&snapshot.repos),
    serde_json::to_vec(&snapshot.collaborators),
    serde_json::to_vec(&snapshot.collaborators_repos),
  ] {
    // Serialising plain maps of strings cannot fail.
    hasher.update(part.unwrap_or_default());
    hasher.update([0u8]);
  }
  format!("\"{}\"", hex::encode(hasher.finalize()))
}

/// Whether an `If-None-Match` header value matches `etag`.
///
/// Accepts `*`, comma-separated lists, weak tags, and bare (unquoted) tags.
pub fn matches(if_none_match: &str, etag: &str) -> bool {
  let bare = etag.trim_matches('"');
  if_none_match.split(',').map(str::trim).any(|candidate| {
    candidate == "*"
      || candidate.trim_start_matches("W/").trim_matches('"') == bare
  })
}
