//! GitHub client backed by the `gh` command-line tool
//!
//! This crate provides a trait-based GitHub client. The review loop only
//! talks to the `GitHubClient` trait, so tests can substitute a fake while
//! the binary uses `GhCliClient`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - pull_request_by_url()                         │
//! │  - search_pull_request_urls()                    │
//! │  - approve() / merge() / checks() ...            │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!               ┌─────────────────┐
//!               │  GhCliClient    │──▶ gh pr view --json ...
//!               └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{GhCliClient, GitHubClient};
//!
//! # fn example() -> Result<(), gh_client::GhError> {
//! let client = GhCliClient::new("gh");
//! let repo = client.current_repository()?;
//! let pr = client.pull_request_in_repository(&repo, None)?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod gh_cli_client;
pub mod types;

/// Default GitHub host (public GitHub)
pub const DEFAULT_HOST: &str = "github.com";

pub use client::GitHubClient;
pub use error::GhError;
pub use gh_cli_client::GhCliClient;
pub use types::{PullRequest, PullRequestField, Repository, RepositoryOwner};
