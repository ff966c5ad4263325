//! Application configuration
//!
//! Configuration loaded from `.gh-pr-repl.toml`.

use serde::{Deserialize, Serialize};

/// Application configuration loaded from `.gh-pr-repl.toml`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Deep link opened by the deploy command (e.g. a Slack channel)
    #[serde(default)]
    pub slack_link: Option<String>,

    /// Review PRs even when they are already closed
    #[serde(default)]
    pub show_all: bool,

    /// Program used for every GitHub call
    #[serde(default = "default_gh_program")]
    pub gh_program: String,

    /// Launcher for detached side panes, the pane's shell command is appended
    #[serde(default = "default_pane_command")]
    pub pane_command: Vec<String>,

    /// Seconds between two status check refreshes in the watch pane
    #[serde(default = "default_watch_interval_secs")]
    pub watch_interval_secs: u64,

    /// Chat command copied in front of the PR link by the deploy command
    #[serde(default = "default_deploy_prefix")]
    pub deploy_prefix: String,
}

fn default_gh_program() -> String {
    "gh".to_string()
}

fn default_pane_command() -> Vec<String> {
    ["tmux", "split-window", "-h", "-d"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_watch_interval_secs() -> u64 {
    1
}

fn default_deploy_prefix() -> String {
    ".deploy".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            slack_link: None,
            show_all: false,
            gh_program: default_gh_program(),
            pane_command: default_pane_command(),
            watch_interval_secs: default_watch_interval_secs(),
            deploy_prefix: default_deploy_prefix(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home and config directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::parse(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Parse config file content
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply command line overrides
    ///
    /// A flag only ever switches a setting on, it never clears a configured value.
    pub fn with_overrides(mut self, slack_link: Option<String>, show_all: bool) -> Self {
        if slack_link.is_some() {
            self.slack_link = slack_link;
        }
        self.show_all |= show_all;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.slack_link, None);
        assert!(!config.show_all);
        assert_eq!(config.gh_program, "gh");
        assert_eq!(config.pane_command, vec!["tmux", "split-window", "-h", "-d"]);
        assert_eq!(config.watch_interval_secs, 1);
        assert_eq!(config.deploy_prefix, ".deploy");
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            slack_link = "slack://channel?team=T1&id=C1"
            show_all = true
        "#;
        let config = AppConfig::parse(toml).unwrap();
        assert_eq!(
            config.slack_link.as_deref(),
            Some("slack://channel?team=T1&id=C1")
        );
        assert!(config.show_all);
        // gh_program should use default
        assert_eq!(config.gh_program, "gh");
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            pane_command = ["wezterm", "cli", "split-pane", "--"]
            watch_interval_secs = 5
        "#;
        let config = AppConfig::parse(toml).unwrap();
        assert_eq!(config.pane_command, vec!["wezterm", "cli", "split-pane", "--"]);
        assert_eq!(config.watch_interval_secs, 5);
        assert_eq!(config.deploy_prefix, ".deploy");
    }

    #[test]
    fn test_config_rejects_wrong_types() {
        assert!(AppConfig::parse("show_all = \"yes\"").is_err());
    }

    #[test]
    fn test_overrides_from_flags() {
        let config = AppConfig::default().with_overrides(Some("slack://x".to_string()), true);
        assert_eq!(config.slack_link.as_deref(), Some("slack://x"));
        assert!(config.show_all);
    }

    #[test]
    fn test_overrides_keep_configured_values() {
        let config = AppConfig {
            slack_link: Some("slack://configured".to_string()),
            show_all: true,
            ..AppConfig::default()
        }
        .with_overrides(None, false);
        assert_eq!(config.slack_link.as_deref(), Some("slack://configured"));
        assert!(config.show_all);
    }
}
