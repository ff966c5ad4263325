//! `gh` CLI data transfer objects
//!
//! These types mirror the JSON printed by `gh ... --json <fields>`.
//! Every field is optional because callers only request the fields they need.

use serde::{Deserialize, Serialize};

/// A pull request as printed by `gh pr view --json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PullRequest {
    /// Canonical PR URL
    pub url: Option<String>,

    /// PR number (e.g., 123)
    pub number: Option<u64>,

    /// HEAD branch name (e.g., "feature/foo")
    pub head_ref_name: Option<String>,

    /// Base branch name (e.g., "main")
    pub base_ref_name: Option<String>,

    /// Whether the PR was merged or closed upstream
    pub closed: Option<bool>,
}

/// JSON fields requested from `gh pr view`
///
/// Each resolution path asks for a different subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullRequestField {
    Url,
    Number,
    HeadRefName,
    BaseRefName,
    Closed,
}

impl PullRequestField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Number => "number",
            Self::HeadRefName => "headRefName",
            Self::BaseRefName => "baseRefName",
            Self::Closed => "closed",
        }
    }

    /// Join fields into the comma separated list `--json` expects
    pub fn join(fields: &[PullRequestField]) -> String {
        fields
            .iter()
            .map(|field| field.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Repository identity as printed by `gh repo view --json owner,name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub owner: RepositoryOwner,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

impl Repository {
    /// `owner/name` slug
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_request_deserialize_partial_fields() {
        let json = r#"{"headRefName":"feat","baseRefName":"main","closed":false}"#;
        let pr: PullRequest = serde_json::from_str(json).unwrap();

        assert_eq!(pr.head_ref_name.as_deref(), Some("feat"));
        assert_eq!(pr.base_ref_name.as_deref(), Some("main"));
        assert_eq!(pr.closed, Some(false));
        assert_eq!(pr.number, None);
        assert_eq!(pr.url, None);
    }

    #[test]
    fn test_pull_request_deserialize_number() {
        let json = r#"{"number":7,"baseRefName":"main","closed":true}"#;
        let pr: PullRequest = serde_json::from_str(json).unwrap();

        assert_eq!(pr.number, Some(7));
        assert_eq!(pr.closed, Some(true));
    }

    #[test]
    fn test_field_join() {
        use PullRequestField::*;
        assert_eq!(
            PullRequestField::join(&[HeadRefName, BaseRefName, Number, Closed]),
            "headRefName,baseRefName,number,closed"
        );
    }

    #[test]
    fn test_repository_slug() {
        let json = r#"{"owner":{"id":"MDQ6","login":"acme"},"name":"widgets"}"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.slug(), "acme/widgets");
    }
}
