//! Canonical pull request reference
//!
//! Whatever the user typed, the resolver turns it into a `PrReference`
//! before the review loop sees it.

use gh_client::DEFAULT_HOST;
use std::fmt;

/// A resolved pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrReference {
    /// Host serving the repository, `github.com` unless resolved from a URL
    pub host: String,
    /// `owner/repo` slug
    pub repo: String,
    pub number: u64,
    /// Head branch
    pub branch: String,
    /// Base branch, unknown when the service did not report it
    pub base: Option<String>,
    /// `None` when the service did not report it
    pub closed: Option<bool>,
}

impl PrReference {
    /// Build a reference, rejecting values that break the slug or branch invariants
    pub fn new(
        repo: impl Into<String>,
        number: u64,
        branch: impl Into<String>,
        base: Option<String>,
        closed: Option<bool>,
    ) -> Option<Self> {
        let repo = repo.into();
        let branch = branch.into();

        if !is_repo_slug(&repo) || branch.is_empty() {
            return None;
        }

        Some(Self {
            host: DEFAULT_HOST.to_string(),
            repo,
            number,
            branch,
            base: base.filter(|base| !base.is_empty()),
            closed,
        })
    }

    /// Same reference on another host
    pub fn on_host(self, host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..self
        }
    }

    /// Repository argument for `gh --repo`
    ///
    /// `owner/repo` on the default host, `host/owner/repo` anywhere else.
    pub fn target(&self) -> String {
        if self.host.eq_ignore_ascii_case(DEFAULT_HOST) {
            self.repo.clone()
        } else {
            format!("{}/{}", self.host, self.repo)
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed == Some(true)
    }

    /// Browser URL of the PR
    pub fn url(&self) -> String {
        format!("https://{}/{}/pull/{}", self.host, self.repo, self.number)
    }

    /// `owner/repo/branch`, used for the prompt
    pub fn location(&self) -> String {
        format!("{}/{}", self.repo, self.branch)
    }
}

impl fmt::Display for PrReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.repo, self.branch, self.number)
    }
}

/// `owner/repo` with exactly one slash and both halves non-empty
pub fn is_repo_slug(repo: &str) -> bool {
    match repo.split_once('/') {
        Some((owner, name)) => !owner.is_empty() && !name.is_empty() && !name.contains('/'),
        None => false,
    }
}
