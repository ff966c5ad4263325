//! Test doubles for the review loop collaborators
//!
//! Every fake records the calls it receives as readable strings so tests
//! can assert on what was (or was not) invoked.

use crate::desktop::Desktop;
use crate::keys::{Key, KeySource};
use gh_client::{GhError, GitHubClient, PullRequest};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io;

fn not_found(command: &str) -> GhError {
    GhError::Malformed {
        command: command.to_string(),
        field: "pull request",
    }
}

/// Scripted GitHub client
///
/// Queries answer from the configured maps; anything not configured fails.
#[derive(Default)]
pub struct FakeClient {
    pub by_url: HashMap<String, PullRequest>,
    pub by_branch: HashMap<(String, String), PullRequest>,
    pub search: Option<Vec<String>>,
    pub current_repo: Option<String>,
    pub in_repo: HashMap<(String, Option<String>), PullRequest>,
    pub current_url: Option<String>,
    pub failing_actions: bool,
    /// Branches already containing their base, so updating merges nothing
    pub up_to_date: bool,
    pub calls: RefCell<Vec<String>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: &str, head: &str, base: &str, closed: bool) -> Self {
        self.by_url.insert(
            url.to_string(),
            PullRequest {
                head_ref_name: Some(head.to_string()),
                base_ref_name: Some(base.to_string()),
                closed: Some(closed),
                ..PullRequest::default()
            },
        );
        self
    }

    pub fn with_branch(
        mut self,
        repo: &str,
        branch: &str,
        number: u64,
        base: &str,
        closed: bool,
    ) -> Self {
        self.by_branch.insert(
            (repo.to_string(), branch.to_string()),
            PullRequest {
                number: Some(number),
                base_ref_name: Some(base.to_string()),
                closed: Some(closed),
                ..PullRequest::default()
            },
        );
        self
    }

    pub fn with_search(mut self, urls: &[&str]) -> Self {
        self.search = Some(urls.iter().map(|url| url.to_string()).collect());
        self
    }

    pub fn with_current_repo(mut self, repo: &str) -> Self {
        self.current_repo = Some(repo.to_string());
        self
    }

    pub fn with_in_repo(
        mut self,
        repo: &str,
        hint: Option<&str>,
        head: &str,
        number: u64,
        closed: bool,
    ) -> Self {
        self.in_repo.insert(
            (repo.to_string(), hint.map(String::from)),
            PullRequest {
                number: Some(number),
                head_ref_name: Some(head.to_string()),
                base_ref_name: Some("main".to_string()),
                closed: Some(closed),
                ..PullRequest::default()
            },
        );
        self
    }

    pub fn with_current_url(mut self, url: &str) -> Self {
        self.current_url = Some(url.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Calls whose name starts with `prefix`
    pub fn calls_to(&self, prefix: &str) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn action(&self, call: String) -> gh_client::error::Result<()> {
        let failing = self.failing_actions;
        self.record(call.clone());
        if failing {
            return Err(not_found(&call));
        }
        Ok(())
    }
}

impl GitHubClient for FakeClient {
    fn pull_request_by_url(&self, url: &str) -> gh_client::error::Result<PullRequest> {
        self.record(format!("pull_request_by_url {}", url));
        self.by_url.get(url).cloned().ok_or_else(|| not_found(url))
    }

    fn pull_request_for_branch(
        &self,
        repo: &str,
        branch: &str,
    ) -> gh_client::error::Result<PullRequest> {
        self.record(format!("pull_request_for_branch {} {}", repo, branch));
        self.by_branch
            .get(&(repo.to_string(), branch.to_string()))
            .cloned()
            .ok_or_else(|| not_found(branch))
    }

    fn search_pull_request_urls(&self, query: &str) -> gh_client::error::Result<Vec<String>> {
        self.record(format!("search_pull_request_urls {}", query));
        self.search.clone().ok_or_else(|| not_found(query))
    }

    fn current_repository(&self) -> gh_client::error::Result<String> {
        self.record("current_repository".to_string());
        self.current_repo
            .clone()
            .ok_or_else(|| not_found("repo view"))
    }

    fn pull_request_in_repository(
        &self,
        repo: &str,
        hint: Option<&str>,
    ) -> gh_client::error::Result<PullRequest> {
        self.record(format!(
            "pull_request_in_repository {} {}",
            repo,
            hint.unwrap_or("<none>")
        ));
        self.in_repo
            .get(&(repo.to_string(), hint.map(String::from)))
            .cloned()
            .ok_or_else(|| not_found(repo))
    }

    fn current_pull_request_url(&self) -> gh_client::error::Result<String> {
        self.record("current_pull_request_url".to_string());
        self.current_url.clone().ok_or_else(|| not_found("pr view"))
    }

    fn approve(&self, repo: &str, branch: &str) -> gh_client::error::Result<()> {
        self.action(format!("approve {} {}", repo, branch))
    }

    fn merge(&self, repo: &str, branch: &str) -> gh_client::error::Result<()> {
        self.action(format!("merge {} {}", repo, branch))
    }

    fn open_in_browser(&self, repo: &str, branch: &str) -> gh_client::error::Result<()> {
        self.action(format!("open_in_browser {} {}", repo, branch))
    }

    fn view_comments(&self, repo: &str, branch: &str) -> gh_client::error::Result<()> {
        self.action(format!("view_comments {} {}", repo, branch))
    }

    fn checks(&self, repo: &str, branch: &str) -> gh_client::error::Result<()> {
        self.action(format!("checks {} {}", repo, branch))
    }

    fn checkout(&self, repo: &str, branch: &str) -> gh_client::error::Result<()> {
        self.action(format!("checkout {} {}", repo, branch))
    }

    fn merge_base_into_head(
        &self,
        repo: &str,
        base: &str,
        head: &str,
    ) -> gh_client::error::Result<bool> {
        self.action(format!("merge_base_into_head {} {} {}", repo, base, head))?;
        Ok(!self.up_to_date)
    }

    fn diff_command(&self, repo: &str, branch: &str) -> Vec<String> {
        vec![
            "gh".to_string(),
            "pr".to_string(),
            "diff".to_string(),
            "--repo".to_string(),
            repo.to_string(),
            branch.to_string(),
        ]
    }

    fn checks_command(&self, repo: &str, branch: &str) -> Vec<String> {
        vec![
            "gh".to_string(),
            "pr".to_string(),
            "checks".to_string(),
            "--repo".to_string(),
            repo.to_string(),
            branch.to_string(),
        ]
    }
}

/// Records desktop side effects instead of performing them
#[derive(Default)]
pub struct FakeDesktop {
    pub remote: Option<String>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeDesktop {
    pub fn with_remote(remote: &str) -> Self {
        Self {
            remote: Some(remote.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Desktop for FakeDesktop {
    fn copy_to_clipboard(&self, text: &str) -> anyhow::Result<()> {
        self.calls.borrow_mut().push(format!("copy {}", text));
        Ok(())
    }

    fn open_url(&self, url: &str) -> anyhow::Result<()> {
        self.calls.borrow_mut().push(format!("open {}", url));
        Ok(())
    }

    fn split_pane(&self, shell_command: &str) -> anyhow::Result<()> {
        self.calls.borrow_mut().push(format!("pane {}", shell_command));
        Ok(())
    }

    fn origin_remote_url(&self) -> Option<String> {
        self.remote.clone()
    }
}

/// Key source replaying a fixed script
///
/// Running out of keys is reported as end of input, which ends the session.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<Key>,
    pub reads: usize,
}

impl ScriptedKeys {
    pub fn new(keys: &[Key]) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            reads: 0,
        }
    }

    /// Script made of plain characters
    pub fn chars(keys: &str) -> Self {
        Self::new(&keys.chars().map(Key::Char).collect::<Vec<_>>())
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> io::Result<Key> {
        self.reads += 1;
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}
