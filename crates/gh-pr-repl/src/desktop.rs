//! Desktop side effects
//!
//! Clipboard, browser, side panes and the local git remote. Launchers are
//! waited for; whatever they start keeps running on its own.

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};

pub trait Desktop {
    /// Replace the clipboard content
    fn copy_to_clipboard(&self, text: &str) -> Result<()>;

    /// Open a URL with the system handler
    fn open_url(&self, url: &str) -> Result<()>;

    /// Run a shell command in a detached side pane, without waiting for it
    fn split_pane(&self, shell_command: &str) -> Result<()>;

    /// `remote.origin.url` of the working directory, if it is a git checkout
    fn origin_remote_url(&self) -> Option<String>;
}

/// Desktop integration through the platform's standard commands
#[derive(Debug, Clone)]
pub struct SystemDesktop {
    pane_command: Vec<String>,
}

impl SystemDesktop {
    /// `pane_command` is the launcher the pane's shell command gets appended to
    pub fn new(pane_command: Vec<String>) -> Self {
        Self { pane_command }
    }
}

/// Clipboard writer for the current platform
fn clipboard_command() -> Command {
    #[cfg(target_os = "macos")]
    let command = Command::new("pbcopy");

    #[cfg(target_os = "windows")]
    let command = Command::new("clip");

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let command = if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        Command::new("wl-copy")
    } else {
        let mut command = Command::new("xclip");
        command.args(["-selection", "clipboard"]);
        command
    };

    command
}

/// URL opener for the current platform
fn open_command(url: &str) -> Command {
    #[cfg(target_os = "macos")]
    let command = {
        let mut command = Command::new("open");
        command.arg(url);
        command
    };

    #[cfg(target_os = "windows")]
    let command = {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", url]);
        command
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let command = {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        command
    };

    command
}

/// Run a launcher that hands its work off and returns right away
fn launch(mut command: Command) -> Result<()> {
    let status = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;

    if !status.success() {
        bail!("{:?} exited with {}", command.get_program(), status);
    }
    Ok(())
}

impl Desktop for SystemDesktop {
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let mut command = clipboard_command();
        let mut child = command
            .stdin(Stdio::piped())
            .spawn()
            .context("Failed to start the clipboard command")?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }

        let status = child.wait()?;
        if !status.success() {
            bail!("Clipboard command exited with {}", status);
        }

        log::debug!("Copied {} to clipboard", text);
        Ok(())
    }

    /// Uses platform-specific commands:
    /// - macOS: `open`
    /// - Linux: `xdg-open`
    /// - Windows: `cmd /C start`
    fn open_url(&self, url: &str) -> Result<()> {
        launch(open_command(url)).with_context(|| format!("Failed to open {}", url))
    }

    fn split_pane(&self, shell_command: &str) -> Result<()> {
        let Some((program, args)) = self.pane_command.split_first() else {
            bail!("No pane command configured");
        };

        log::debug!("Opening pane: {} {}", shell_join(&self.pane_command), shell_command);

        let mut command = Command::new(program);
        command.args(args).arg(shell_command);
        launch(command).with_context(|| format!("Failed to open a pane with {}", program))
    }

    fn origin_remote_url(&self) -> Option<String> {
        let output = Command::new("git")
            .args(["config", "--get", "remote.origin.url"])
            .stderr(Stdio::null())
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            .filter(|remote| !remote.is_empty())
    }
}

/// Join arguments into one POSIX shell command line
pub fn shell_join<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|arg| shell_quote(arg.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));

    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
