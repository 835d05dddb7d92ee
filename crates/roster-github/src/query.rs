//! GraphQL documents sent to the GitHub API.

/// One page of repositories the organization shares with collaborators, each
/// with its outside collaborators.
pub(crate) const LIST_REPOSITORY_COLLABORATORS: &str = r#"
query ListRepositoryCollaborators($org: String!, $cursor: String, $pageSize: Int!) {
  organization(login: $org) {
    id
    repositories(affiliations: COLLABORATOR, first: $pageSize, after: $cursor) {
      pageInfo {
        endCursor
      }
      nodes {
        name
        url
        collaborators(affiliation: OUTSIDE) {
          nodes {
            name
            login
            url
            company
            avatarUrl
          }
        }
      }
    }
  }
}
"#;

/// A user's profile plus the commit contributions and issue comments they
/// made within one organization.
pub(crate) const GET_USER_PROFILE_WITH_CONTRIBUTIONS: &str = r#"
query GetUserProfileWithContributions($orgId: ID!, $login: String!) {
  user(login: $login) {
    login
    avatarUrl
    url
    company
    bio
    organizations(first: 100) {
      nodes {
        login
        name
      }
    }
    contributionsCollection(organizationID: $orgId) {
      commitContributionsByRepository(maxRepositories: 100) {
        repository {
          name
          owner {
            login
          }
        }
        contributions(first: 100) {
          totalCount
          nodes {
            url
            commitCount
            occurredAt
          }
        }
      }
    }
    issueComments(last: 100) {
      nodes {
        id
        url
        bodyText
        bodyHTML
        createdAt
        repository {
          name
          owner {
            login
          }
        }
        issue {
          title
          url
        }
      }
    }
  }
}
"#;
