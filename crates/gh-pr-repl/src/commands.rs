//! Command execution
//!
//! The effectful half of every `CommandId`. Commands delegate the actual
//! work to the GitHub client or the desktop and report back how the review
//! loop should continue.

use crate::command_id::CommandId;
use crate::desktop::{shell_join, Desktop};
use crate::keymap::Keymap;
use crate::reference::PrReference;
use anyhow::Result;
use gh_client::GitHubClient;
use gh_pr_repl_config::AppConfig;
use std::io::Write;

/// What the review loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Prompt again for the same PR
    Stay,
    /// End the session for this PR
    Next,
    /// End the whole program
    Quit,
}

/// Everything a command may touch
pub struct CommandContext<'a> {
    pub pr: &'a PrReference,
    pub client: &'a dyn GitHubClient,
    pub desktop: &'a dyn Desktop,
    pub config: &'a AppConfig,
    pub keymap: &'a Keymap,
    pub out: &'a mut dyn Write,
}

/// Run `command` against the PR in `ctx`
pub fn execute(command: CommandId, ctx: &mut CommandContext) -> Result<Flow> {
    let pr = ctx.pr;
    let repo = pr.target();
    let branch = pr.branch.as_str();

    match command {
        CommandId::Help => writeln!(ctx.out, "{}", ctx.keymap.help())?,
        CommandId::Approve => ctx.client.approve(&repo, branch)?,
        CommandId::Merge => ctx.client.merge(&repo, branch)?,
        CommandId::Open => ctx.client.open_in_browser(&repo, branch)?,
        CommandId::Deploy => deploy(ctx)?,
        CommandId::View => view(ctx)?,
        CommandId::Status => ctx.client.checks(&repo, branch)?,
        CommandId::Watch => watch(ctx)?,
        CommandId::Copy => ctx.desktop.copy_to_clipboard(&pr.url())?,
        CommandId::Next => return Ok(Flow::Next),
        CommandId::Update => update(ctx)?,
        CommandId::Checkout => checkout(ctx)?,
        CommandId::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Stay)
}

fn deploy(ctx: &mut CommandContext) -> Result<()> {
    let phrase = format!("{} {}", ctx.config.deploy_prefix, ctx.pr.url());
    ctx.desktop.copy_to_clipboard(&phrase)?;

    match ctx.config.slack_link.as_deref() {
        Some(link) => ctx.desktop.open_url(link)?,
        None => writeln!(ctx.out, "set -s flag for fast slack opening")?,
    }
    Ok(())
}

fn view(ctx: &mut CommandContext) -> Result<()> {
    let diff = shell_join(&ctx.client.diff_command(&ctx.pr.target(), &ctx.pr.branch));
    if let Err(e) = ctx.desktop.split_pane(&diff) {
        log::warn!("Could not open diff pane: {:#}", e);
        writeln!(ctx.out, "Could not open the diff pane: {}", e)?;
    }

    ctx.client.view_comments(&ctx.pr.target(), &ctx.pr.branch)?;
    Ok(())
}

fn watch(ctx: &mut CommandContext) -> Result<()> {
    ctx.desktop.split_pane(&watch_script(
        &ctx.client.checks_command(&ctx.pr.target(), &ctx.pr.branch),
        ctx.config.watch_interval_secs,
    ))
}

/// Shell loop that reruns `checks` until the pane is closed
fn watch_script(checks: &[String], interval_secs: u64) -> String {
    format!(
        "while true; do {}; sleep {}; done",
        shell_join(checks),
        interval_secs.max(1)
    )
}

fn update(ctx: &mut CommandContext) -> Result<()> {
    let pr = ctx.pr;
    let Some(base) = pr.base.as_deref() else {
        writeln!(ctx.out, "Cannot update {}, base branch is unknown.", pr.branch)?;
        return Ok(());
    };

    if ctx.client.merge_base_into_head(&pr.target(), base, &pr.branch)? {
        writeln!(ctx.out, "Merged {} into {}.", base, pr.branch)?;
    } else {
        writeln!(ctx.out, "{} is already up to date with {}.", pr.branch, base)?;
    }
    Ok(())
}

fn checkout(ctx: &mut CommandContext) -> Result<()> {
    let pr = ctx.pr;
    let remote = ctx.desktop.origin_remote_url();

    if remote.is_some_and(|remote| remote_matches(&remote, &pr.host, &pr.repo)) {
        ctx.client.checkout(&pr.target(), &pr.branch)?;
    } else {
        writeln!(
            ctx.out,
            "Cannot checkout {}, move to where {} cloned.",
            pr.branch, pr.repo
        )?;
    }
    Ok(())
}

/// Whether a git remote URL points at `repo` on `host`
///
/// Accepts the SSH (`git@host:owner/repo.git`) and HTTPS forms, with or
/// without the `.git` suffix.
pub fn remote_matches(remote: &str, host: &str, repo: &str) -> bool {
    let host = host.to_ascii_lowercase();
    let prefixes = [
        format!("git@{}:", host),
        format!("ssh://git@{}/", host),
        format!("https://{}/", host),
    ];

    let remote = remote.trim();
    let lowered = remote.to_ascii_lowercase();
    prefixes
        .iter()
        .find(|prefix| lowered.starts_with(prefix.as_str()))
        .map(|prefix| &remote[prefix.len()..])
        .map(|path| path.trim_end_matches('/'))
        .map(|path| path.strip_suffix(".git").unwrap_or(path))
        .is_some_and(|path| path.eq_ignore_ascii_case(repo))
}
