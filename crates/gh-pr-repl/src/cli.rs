//! Command line interface

use clap::Parser;

/// Review pull requests one keystroke at a time
#[derive(Debug, Parser)]
#[command(name = "gh-pr-repl", version, about)]
pub struct Cli {
    /// PR URLs, owner/repo/branch triples, search queries, or a branch or
    /// number in the current repository. Defaults to the PR of the
    /// checked-out branch.
    pub references: Vec<String>,

    /// Deep link opened by the deploy command (e.g. a Slack channel)
    #[arg(short = 's', long)]
    pub slack_link: Option<String>,

    /// Also review PRs that are already closed
    #[arg(short = 'a', long)]
    pub show_all: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags_and_references() {
        let cli = Cli::parse_from([
            "gh-pr-repl",
            "-s",
            "slack://channel?id=C1",
            "--show-all",
            "acme/widgets/feat",
            "is:pr author:me",
        ]);
        assert_eq!(cli.slack_link.as_deref(), Some("slack://channel?id=C1"));
        assert!(cli.show_all);
        assert_eq!(cli.references, vec!["acme/widgets/feat", "is:pr author:me"]);
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::parse_from(["gh-pr-repl"]);
        assert!(cli.references.is_empty());
        assert_eq!(cli.slack_link, None);
        assert!(!cli.show_all);
    }
}
