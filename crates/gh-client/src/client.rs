//! GitHub client trait
//!
//! This module defines the `GitHubClient` trait: the queries the reference
//! resolver needs and the side effects the review commands delegate to the
//! hosting service.

use crate::error::Result;
use crate::types::PullRequest;

/// GitHub client trait
///
/// Queries return typed results and signal failure through `Err`, never by
/// panicking, so callers can branch on it. Side effects run attached to the
/// terminal: their output is for the user, not for the caller.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::{GitHubClient, GhCliClient};
///
/// let client = GhCliClient::new("gh");
/// let pr = client.pull_request_by_url("https://github.com/acme/widgets/pull/42")?;
/// ```
pub trait GitHubClient {
    // === Queries ===

    /// Fetch head branch, base branch and closed state of the PR at `url`
    fn pull_request_by_url(&self, url: &str) -> Result<PullRequest>;

    /// Fetch number, base branch and closed state of the PR whose head is `branch`
    fn pull_request_for_branch(&self, repo: &str, branch: &str) -> Result<PullRequest>;

    /// Run a paginated issue search and return the HTML URL of every hit
    fn search_pull_request_urls(&self, query: &str) -> Result<Vec<String>>;

    /// `owner/name` of the repository the working directory belongs to
    fn current_repository(&self) -> Result<String>;

    /// Fetch head, base, number and closed state of a PR inside `repo`
    ///
    /// `hint` is a branch name or PR number. `None` lets `gh` infer the PR
    /// from the checked-out branch.
    fn pull_request_in_repository(&self, repo: &str, hint: Option<&str>) -> Result<PullRequest>;

    /// URL of the PR for the checked-out branch
    fn current_pull_request_url(&self) -> Result<String>;

    // === PR Operations ===
    //
    // `repo` is `owner/repo` on github.com and `host/owner/repo` elsewhere.

    /// Submit an approving review without a comment
    fn approve(&self, repo: &str, branch: &str) -> Result<()>;

    /// Merge with a merge commit and delete the head branch
    fn merge(&self, repo: &str, branch: &str) -> Result<()>;

    /// Open the PR in the web browser
    fn open_in_browser(&self, repo: &str, branch: &str) -> Result<()>;

    /// Print the PR with all of its comments
    fn view_comments(&self, repo: &str, branch: &str) -> Result<()>;

    /// Print the status checks of the PR
    fn checks(&self, repo: &str, branch: &str) -> Result<()>;

    /// Check out the PR head in the local working copy
    fn checkout(&self, repo: &str, branch: &str) -> Result<()>;

    /// Create a merge commit that brings `base` into `head`
    ///
    /// Returns `false` when `head` already contains `base` and nothing was merged.
    fn merge_base_into_head(&self, repo: &str, base: &str, head: &str) -> Result<bool>;

    // === Command lines for detached panes ===

    /// Argument vector that prints the PR diff
    fn diff_command(&self, repo: &str, branch: &str) -> Vec<String>;

    /// Argument vector that prints the PR status checks
    fn checks_command(&self, repo: &str, branch: &str) -> Vec<String>;
}
