//! Reference resolution
//!
//! Turns whatever the user passed on the command line into `PrReference`s.
//! Four strategies are tried in order and the first one producing at least
//! one reference wins:
//!
//! 1. PR URL: `https://<host>/<owner>/<repo>/pull/<number>`
//! 2. Triple: `<owner>/<repo>/<branch>` (the branch may contain slashes)
//! 3. Search query, every hit resolved as a PR URL
//! 4. Branch or number of a PR in the repository of the working directory
//!
//! The first three fail softly and hand over to the next strategy. The last
//! one has nothing to fall back to, so its failures halt the program.

use crate::halt::Halt;
use crate::reference::{is_repo_slug, PrReference};
use gh_client::{GitHubClient, PullRequest};
use log::{debug, warn};
use regex::Regex;
use std::sync::OnceLock;

/// Owner, repo and number extracted from a PR URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrUrl {
    pub host: String,
    pub repo: String,
    pub number: u64,
}

impl PrUrl {
    /// URL without any trailing path such as `/files`
    pub fn canonical(&self) -> String {
        format!("https://{}/{}/pull/{}", self.host, self.repo, self.number)
    }
}

/// Parse `https://<host>/<owner>/<repo>/pull/<number>[/...]`
pub fn parse_pr_url(raw: &str) -> Option<PrUrl> {
    static PR_URL_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = PR_URL_REGEX.get_or_init(|| {
        Regex::new(r"^https://([^/\s]+)/([^/\s]+)/([^/\s]+)/pull/(\d+)(?:[/?#]\S*)?$").unwrap()
    });

    let captures = re.captures(raw.trim())?;
    Some(PrUrl {
        host: captures.get(1)?.as_str().to_string(),
        repo: format!("{}/{}", captures.get(2)?.as_str(), captures.get(3)?.as_str()),
        number: captures.get(4)?.as_str().parse().ok()?,
    })
}

/// Parse `<owner>/<repo>/<branch>` into `(repo, branch)`
///
/// Only the first two slashes separate fields; everything after them is the
/// branch name.
pub fn parse_triple(raw: &str) -> Option<(String, String)> {
    static TRIPLE_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = TRIPLE_REGEX.get_or_init(|| Regex::new(r"^([^/\s]+)/([^/\s]+)/(\S+)$").unwrap());

    let captures = re.captures(raw.trim())?;
    Some((
        format!("{}/{}", captures.get(1)?.as_str(), captures.get(2)?.as_str()),
        captures.get(3)?.as_str().to_string(),
    ))
}

pub struct ReferenceResolver<'a> {
    client: &'a dyn GitHubClient,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(client: &'a dyn GitHubClient) -> Self {
        Self { client }
    }

    /// Resolve every raw reference, or the PR of the working directory when none are given
    pub fn resolve_all(&self, raws: &[String]) -> Result<Vec<PrReference>, Halt> {
        if raws.is_empty() {
            let url = self.client.current_pull_request_url().map_err(|e| {
                warn!("No current pull request: {}", e);
                Halt::NoCurrentPullRequest
            })?;
            debug!("Using current pull request {}", url.trim());
            return self.resolve(url.trim());
        }

        let mut resolved = Vec::new();
        for raw in raws {
            resolved.extend(self.resolve(raw)?);
        }
        Ok(resolved)
    }

    /// Resolve a single raw reference with the first strategy that succeeds
    pub fn resolve(&self, raw: &str) -> Result<Vec<PrReference>, Halt> {
        let raw = raw.trim();

        if let Some(pr) = self.from_url(raw) {
            return Ok(vec![pr]);
        }

        if let Some(pr) = self.from_triple(raw) {
            return Ok(vec![pr]);
        }

        let found = self.from_search(raw);
        if !found.is_empty() {
            return Ok(found);
        }

        self.from_current_repository(raw).map(|pr| vec![pr])
    }

    fn from_url(&self, raw: &str) -> Option<PrReference> {
        let url = parse_pr_url(raw)?;

        let pr = self
            .client
            .pull_request_by_url(&url.canonical())
            .map_err(|e| debug!("{} is not a known pull request: {}", raw, e))
            .ok()?;

        build(url.repo, Some(url.number), pr, raw).map(|reference| reference.on_host(url.host))
    }

    fn from_triple(&self, raw: &str) -> Option<PrReference> {
        let (repo, branch) = parse_triple(raw)?;

        let pr = self
            .client
            .pull_request_for_branch(&repo, &branch)
            .map_err(|e| debug!("No pull request for {}: {}", raw, e))
            .ok()?;

        let pr = PullRequest {
            head_ref_name: Some(branch),
            ..pr
        };
        build(repo, None, pr, raw)
    }

    fn from_search(&self, query: &str) -> Vec<PrReference> {
        let urls = match self.client.search_pull_request_urls(query) {
            Ok(urls) => urls,
            Err(e) => {
                warn!("Search for '{}' failed: {}", query, e);
                return Vec::new();
            }
        };

        debug!("Search for '{}' returned {} result(s)", query, urls.len());
        urls.iter().filter_map(|url| self.from_url(url)).collect()
    }

    fn from_current_repository(&self, raw: &str) -> Result<PrReference, Halt> {
        let repo = self
            .client
            .current_repository()
            .map_err(|e| {
                warn!("Could not infer the current repository: {}", e);
                Halt::NoCurrentRepository
            })?
            .trim()
            .to_string();

        if !is_repo_slug(&repo) {
            warn!("Current repository '{}' is not an owner/name slug", repo);
            return Err(Halt::NoCurrentRepository);
        }

        let hint = Some(raw).filter(|hint| !hint.is_empty());
        let pr = self
            .client
            .pull_request_in_repository(&repo, hint)
            .map_err(|e| {
                warn!("No pull request for '{}' in {}: {}", raw, repo, e);
                Halt::Unresolved(raw.to_string())
            })?;

        build(repo, None, pr, raw).ok_or_else(|| Halt::Unresolved(raw.to_string()))
    }
}

/// Combine the parts known from the raw reference with the service answer
fn build(repo: String, number: Option<u64>, pr: PullRequest, raw: &str) -> Option<PrReference> {
    let reference = PrReference::new(
        repo,
        number.or(pr.number)?,
        pr.head_ref_name.unwrap_or_default(),
        pr.base_ref_name,
        pr.closed,
    );

    if reference.is_none() {
        debug!("Incomplete answer for '{}', skipping", raw);
    }
    reference
}
