//! Command identifiers
//!
//! Every review command is a variant of `CommandId`. The metadata functions
//! (`trigger`, `help`, `name`) are pure; executing a command lives in
//! `commands::execute`. Iterating the enum is how the keymap discovers the
//! command set, so adding a variant is all it takes to register a command.

use crossterm::style::Stylize;
use strum::{EnumIter, IntoStaticStr};

/// Unique identifier for each review command.
///
/// The trigger character is the stable contract with the user; variant
/// order only decides the order of the help listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum CommandId {
    /// Print the list of commands
    Help,
    /// Approve the PR without a comment
    Approve,
    /// Merge with a merge commit and delete the branch
    Merge,
    /// Open the PR in the browser
    Open,
    /// Copy the deploy phrase and jump to the chat
    Deploy,
    /// Diff in a side pane, comments here
    View,
    /// Print the status checks
    Status,
    /// Poll the status checks in a side pane
    Watch,
    /// Copy the PR link
    Copy,
    /// Move on to the next PR
    Next,
    /// Merge the base branch into the PR branch
    Update,
    /// Check out the PR branch locally
    Checkout,
    /// Leave the program
    Quit,
}

impl CommandId {
    /// Key that runs this command
    pub fn trigger(self) -> char {
        match self {
            Self::Help => 'h',
            Self::Approve => 'a',
            Self::Merge => 'm',
            Self::Open => 'o',
            Self::Deploy => 'd',
            Self::View => 'v',
            Self::Status => 's',
            Self::Watch => 'w',
            Self::Copy => 'c',
            Self::Next => 'n',
            Self::Update => 'u',
            Self::Checkout => 'k',
            Self::Quit => 'q',
        }
    }

    /// Name printed when the command runs (e.g. `approve`)
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Help text split around the mnemonic letter
    fn help_parts(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Help => ("Show this ", "H", "elp"),
            Self::Approve => ("", "A", "pprove the PR, no comment"),
            Self::Merge => ("", "M", "erge the PR with 'merge' strategy, no message"),
            Self::Open => ("", "O", "pen in browser"),
            Self::Deploy => ("", "D", "eploy the branch from slack"),
            Self::View => ("", "V", "iew the PR with all the comments"),
            Self::Status => ("view the PR ", "S", "tatus checks"),
            Self::Watch => ("", "W", "atch the status"),
            Self::Copy => ("", "C", "opy the link to the clipboard"),
            Self::Next => ("Go to ", "N", "ext branch"),
            Self::Update => ("", "U", "pdate the PR from the base branch."),
            Self::Checkout => ("chec", "K", "out the branch if in the right repo"),
            Self::Quit => ("", "Q", "uit"),
        }
    }

    /// Help text with the mnemonic letter highlighted
    pub fn help(self) -> String {
        let (before, key, after) = self.help_parts();
        format!("{}{}{}", before, key.red(), after)
    }
}
