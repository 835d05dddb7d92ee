//! Decoding and error-mapping tests against recorded response shapes.

use reqwest::StatusCode;

use crate::{
  Error, GitHubConfig,
  wire::{RepositoriesData, UserData, decode},
};

const REPOS_PAGE: &str = r#"{
  "data": {
    "organization": {
      "id": "O_kgDOabc",
      "repositories": {
        "pageInfo": { "endCursor": "Y3Vyc29yOjEwMA==" },
        "nodes": [
          {
            "name": "app",
            "url": "https://github.com/acme/app",
            "collaborators": {
              "nodes": [
                {
                  "name": "Bob",
                  "login": "bob",
                  "url": "https://github.com/bob",
                  "company": null,
                  "avatarUrl": "https://avatars.githubusercontent.com/u/1"
                }
              ]
            }
          },
          { "name": "locked", "url": "https://github.com/acme/locked", "collaborators": null },
          null
        ]
      }
    }
  }
}"#;

fn core(e: Error) -> roster_core::Error { e.into() }

// ─── Repositories page ───────────────────────────────────────────────────────

#[test]
fn decodes_repository_page() {
  let data: RepositoriesData = decode(StatusCode::OK, REPOS_PAGE.as_bytes()).unwrap();
  let page = data.into_page().unwrap();

  assert_eq!(page.org_id.as_deref(), Some("O_kgDOabc"));
  assert_eq!(page.end_cursor.as_deref(), Some("Y3Vyc29yOjEwMA=="));
  assert_eq!(page.repositories.len(), 3);
  let app = page.repositories[0].as_ref().unwrap();
  let bob = app.outside_collaborators().next().unwrap();
  assert_eq!(bob.login, "bob");
  assert_eq!(bob.name.as_deref(), Some("Bob"));
}

#[test]
fn null_end_cursor_is_not_malformed() {
  let body = r#"{"data":{"organization":{"id":"O_1","repositories":{
    "pageInfo":{"endCursor":null},"nodes":[]}}}}"#;
  let data: RepositoriesData = decode(StatusCode::OK, body.as_bytes()).unwrap();
  let page = data.into_page().unwrap();
  assert_eq!(page.end_cursor, None);
  assert!(page.repositories.is_empty());
}

#[test]
fn missing_organization_is_malformed() {
  let body = r#"{"data":{"organization":null}}"#;
  let data: RepositoriesData = decode(StatusCode::OK, body.as_bytes()).unwrap();
  let err = data.into_page().unwrap_err();
  assert!(matches!(err, Error::Missing("organization")));
  assert_eq!(core(err), roster_core::Error::MalformedPage("organization"));
}

#[test]
fn missing_organization_id_is_malformed() {
  let body = r#"{"data":{"organization":{"repositories":{
    "pageInfo":{"endCursor":"c1"},"nodes":[]}}}}"#;
  let data: RepositoriesData = decode(StatusCode::OK, body.as_bytes()).unwrap();
  assert_eq!(
    core(data.into_page().unwrap_err()),
    roster_core::Error::MalformedPage("organization id")
  );
}

#[test]
fn missing_page_info_is_malformed() {
  let body = r#"{"data":{"organization":{"id":"O_1","repositories":{"nodes":[]}}}}"#;
  let data: RepositoriesData = decode(StatusCode::OK, body.as_bytes()).unwrap();
  assert_eq!(
    core(data.into_page().unwrap_err()),
    roster_core::Error::MalformedPage("endCursor")
  );
}

#[test]
fn missing_nodes_is_malformed() {
  let body = r#"{"data":{"organization":{"id":"O_1","repositories":{
    "pageInfo":{"endCursor":"c1"}}}}}"#;
  let data: RepositoriesData = decode(StatusCode::OK, body.as_bytes()).unwrap();
  assert!(matches!(data.into_page(), Err(Error::Missing("repositories"))));
}

// ─── Status and envelope errors ──────────────────────────────────────────────

#[test]
fn gateway_timeout_maps_to_upstream_timeout() {
  let err = decode::<RepositoriesData>(StatusCode::GATEWAY_TIMEOUT, b"").unwrap_err();
  assert!(matches!(err, Error::Status(s) if s == StatusCode::GATEWAY_TIMEOUT));
  assert_eq!(core(err), roster_core::Error::UpstreamTimeout);
}

#[test]
fn other_statuses_map_to_fetch_failed() {
  for status in [
    StatusCode::UNAUTHORIZED,
    StatusCode::BAD_GATEWAY,
    StatusCode::INTERNAL_SERVER_ERROR,
  ] {
    let err = decode::<RepositoriesData>(status, b"{}").unwrap_err();
    assert_eq!(core(err), roster_core::Error::UpstreamFetchFailed);
  }
}

#[test]
fn graphql_errors_without_data_fail() {
  let body = r#"{"errors":[{"message":"Something went wrong"}]}"#;
  let err = decode::<RepositoriesData>(StatusCode::OK, body.as_bytes()).unwrap_err();
  assert!(matches!(&err, Error::GraphQl(m) if m == &["Something went wrong".to_string()]));
  assert_eq!(core(err), roster_core::Error::UpstreamFetchFailed);
}

#[test]
fn graphql_errors_with_data_are_tolerated() {
  let body = r#"{"data":{"user":null},"errors":[{"message":"Could not resolve to a User"}]}"#;
  let data: UserData = decode(StatusCode::OK, body.as_bytes()).unwrap();
  assert!(data.user.is_none());
}

#[test]
fn undecodable_body_fails() {
  let err = decode::<RepositoriesData>(StatusCode::OK, b"<html>").unwrap_err();
  assert!(matches!(err, Error::Json(_)));
  assert_eq!(core(err), roster_core::Error::UpstreamFetchFailed);
}

#[test]
fn empty_envelope_is_malformed() {
  let err = decode::<RepositoriesData>(StatusCode::OK, b"{}").unwrap_err();
  assert!(matches!(err, Error::Missing("data")));
}

// ─── User profile ────────────────────────────────────────────────────────────

#[test]
fn decodes_user_profile() {
  let body = r#"{"data":{"user":{
    "login":"bob","avatarUrl":"a","url":"u","company":"B","bio":null,
    "organizations":{"nodes":[{"login":"other","name":"Other Org"}]},
    "contributionsCollection":{"commitContributionsByRepository":[
      {"repository":{"name":"app","owner":{"login":"acme"}},
       "contributions":{"totalCount":1,"nodes":[
         {"url":"c","commitCount":4,"occurredAt":"2024-03-01T08:00:00Z"}]}}]},
    "issueComments":{"nodes":[
      {"id":"IC_1","url":"i","bodyText":"hi","bodyHTML":"<p>hi</p>",
       "createdAt":"2024-03-02T08:00:00Z",
       "repository":{"name":"app","owner":{"login":"acme"}},
       "issue":{"title":"T","url":"iu"}}]}
  }}}"#;
  let data: UserData = decode(StatusCode::OK, body.as_bytes()).unwrap();
  let profile = data.user.unwrap();
  assert_eq!(profile.company.as_deref(), Some("B"));
  assert_eq!(profile.commit_summaries().count(), 1);
  let comment = profile.issue_comments().next().unwrap();
  assert_eq!(
    comment.created_at,
    "2024-03-02T08:00:00Z".parse::<chrono::DateTime<chrono::Utc>>().unwrap()
  );
}

// ─── Config ──────────────────────────────────────────────────────────────────

#[test]
fn config_defaults() {
  let cfg: GitHubConfig =
    serde_json::from_str(r#"{"organization":"acme","token":"t"}"#).unwrap();
  assert_eq!(cfg.api_url, "https://api.github.com/graphql");
  assert_eq!(cfg.effective_page_size(), 100);
  assert_eq!(cfg.timeout_secs, 30);
}

#[test]
fn page_size_is_clamped() {
  let mut cfg = GitHubConfig::new("acme", "t");
  cfg.page_size = 250;
  assert_eq!(cfg.effective_page_size(), 100);
  cfg.page_size = 0;
  assert_eq!(cfg.effective_page_size(), 1);
}

#[test]
fn oversized_page_size_deserialises_and_clamps() {
  let cfg: GitHubConfig =
    serde_json::from_str(r#"{"organization":"acme","token":"t","page_size":500}"#).unwrap();
  assert_eq!(cfg.page_size, 500);
  assert_eq!(cfg.effective_page_size(), 100);
}

#[test]
fn client_builds_from_config() {
  let client = crate::GitHubClient::new(GitHubConfig::new("acme", "t")).unwrap();
  assert_eq!(
    roster_core::fetch::ProfileFetcher::organization(&client),
    "acme"
  );
}
