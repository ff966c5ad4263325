//! `gh`-based GitHub client
//!
//! Implementation of the `GitHubClient` trait that shells out to the GitHub
//! CLI. Authentication and host configuration are whatever `gh` already has.

use crate::client::GitHubClient;
use crate::error::{GhError, Result};
use crate::types::{PullRequest, PullRequestField, Repository};
use log::debug;
use serde::de::DeserializeOwned;
use std::process::{Command, Stdio};

/// GitHub client driving the `gh` binary
#[derive(Debug, Clone)]
pub struct GhCliClient {
    program: String,
}

impl GhCliClient {
    /// Create a client that runs `program` (usually just `"gh"`)
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command_line(&self, args: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run with captured output, failing on a non-success status
    fn capture(&self, args: &[String]) -> Result<Vec<u8>> {
        let command = self.command_line(args);
        debug!("Running {}", command);

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GhError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GhError::Failed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }

    fn query<T: DeserializeOwned>(&self, args: &[String]) -> Result<T> {
        let stdout = self.capture(args)?;
        serde_json::from_slice(&stdout).map_err(|source| GhError::Json {
            command: self.command_line(args),
            source,
        })
    }

    /// Run attached to the terminal and wait for it to exit
    fn run(&self, args: &[String]) -> Result<()> {
        let command = self.command_line(args);
        debug!("Running {}", command);

        let status = Command::new(&self.program)
            .args(args)
            .status()
            .map_err(|source| GhError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(GhError::Failed {
                command,
                status,
                stderr: String::new(),
            });
        }

        Ok(())
    }
}

impl Default for GhCliClient {
    fn default() -> Self {
        Self::new("gh")
    }
}

/// Arguments for `gh pr view` with an optional repo scope and selector
fn pr_view_args(
    repo: Option<&str>,
    selector: Option<&str>,
    fields: &[PullRequestField],
) -> Vec<String> {
    let mut args = vec!["pr".to_string(), "view".to_string()];
    if let Some(repo) = repo {
        args.push("--repo".to_string());
        args.push(repo.to_string());
    }
    args.push("--json".to_string());
    args.push(PullRequestField::join(fields));
    if let Some(selector) = selector {
        args.push(selector.to_string());
    }
    args
}

/// Arguments for a `gh pr <subcommand>` acting on a branch of `repo`
fn pr_args(subcommand: &str, repo: &str, flags: &[&str], branch: &str) -> Vec<String> {
    let mut args = vec![
        "pr".to_string(),
        subcommand.to_string(),
        "--repo".to_string(),
        repo.to_string(),
    ];
    args.extend(flags.iter().map(|flag| flag.to_string()));
    args.push(branch.to_string());
    args
}

fn search_args(query: &str) -> Vec<String> {
    [
        "api",
        "-X",
        "GET",
        "search/issues",
        "--paginate",
        "-f",
        &format!("q={}", query),
        "-q",
        ".items[] | .html_url",
    ]
    .iter()
    .map(|arg| arg.to_string())
    .collect()
}

fn merges_args(repo: &str, base: &str, head: &str) -> Vec<String> {
    let (host, slug) = split_host(repo);
    let mut args = vec!["api".to_string()];
    if let Some(host) = host {
        args.push("--hostname".to_string());
        args.push(host.to_string());
    }
    // The merges endpoint merges `head` into `base`, so the PR's base branch
    // goes into `head` and the PR branch into `base`.
    args.extend([
        format!("/repos/{}/merges", slug),
        "-f".to_string(),
        format!("head={}", base),
        "-f".to_string(),
        format!("base={}", head),
    ]);
    args
}

/// Split `[host/]owner/repo` into the optional host and the slug
fn split_host(repo: &str) -> (Option<&str>, &str) {
    match repo.split_once('/') {
        Some((host, slug)) if slug.contains('/') => (Some(host), slug),
        _ => (None, repo),
    }
}

/// Split `--jq` line output into non-empty entries
fn parse_lines(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

impl GitHubClient for GhCliClient {
    fn pull_request_by_url(&self, url: &str) -> Result<PullRequest> {
        use PullRequestField::*;
        self.query(&pr_view_args(
            None,
            Some(url),
            &[HeadRefName, BaseRefName, Closed],
        ))
    }

    fn pull_request_for_branch(&self, repo: &str, branch: &str) -> Result<PullRequest> {
        use PullRequestField::*;
        self.query(&pr_view_args(
            Some(repo),
            Some(branch),
            &[Number, BaseRefName, Closed],
        ))
    }

    fn search_pull_request_urls(&self, query: &str) -> Result<Vec<String>> {
        let stdout = self.capture(&search_args(query))?;
        Ok(parse_lines(&stdout))
    }

    fn current_repository(&self) -> Result<String> {
        let args: Vec<String> = ["repo", "view", "--json", "owner,name"]
            .iter()
            .map(|arg| arg.to_string())
            .collect();
        let repo: Repository = self.query(&args)?;
        Ok(repo.slug())
    }

    fn pull_request_in_repository(&self, repo: &str, hint: Option<&str>) -> Result<PullRequest> {
        use PullRequestField::*;
        self.query(&pr_view_args(
            Some(repo),
            hint,
            &[HeadRefName, BaseRefName, Number, Closed],
        ))
    }

    fn current_pull_request_url(&self) -> Result<String> {
        let args = pr_view_args(None, None, &[PullRequestField::Url]);
        let pr: PullRequest = self.query(&args)?;
        pr.url.ok_or_else(|| GhError::Malformed {
            command: self.command_line(&args),
            field: "url",
        })
    }

    fn approve(&self, repo: &str, branch: &str) -> Result<()> {
        self.run(&pr_args("review", repo, &["--approve"], branch))
    }

    fn merge(&self, repo: &str, branch: &str) -> Result<()> {
        self.run(&pr_args(
            "merge",
            repo,
            &["--merge", "--delete-branch"],
            branch,
        ))
    }

    fn open_in_browser(&self, repo: &str, branch: &str) -> Result<()> {
        self.run(&pr_args("view", repo, &["--web"], branch))
    }

    fn view_comments(&self, repo: &str, branch: &str) -> Result<()> {
        self.run(&pr_args("view", repo, &["--comments"], branch))
    }

    fn checks(&self, repo: &str, branch: &str) -> Result<()> {
        self.run(&pr_args("checks", repo, &[], branch))
    }

    fn checkout(&self, repo: &str, branch: &str) -> Result<()> {
        self.run(&pr_args("checkout", repo, &[], branch))
    }

    fn merge_base_into_head(&self, repo: &str, base: &str, head: &str) -> Result<bool> {
        // 201 answers with the merge commit, 204 with nothing when `head` already has `base`
        let stdout = self.capture(&merges_args(repo, base, head))?;
        Ok(!stdout.iter().all(u8::is_ascii_whitespace))
    }

    fn diff_command(&self, repo: &str, branch: &str) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(pr_args("diff", repo, &[], branch))
            .collect()
    }

    fn checks_command(&self, repo: &str, branch: &str) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(pr_args("checks", repo, &[], branch))
            .collect()
    }
}
