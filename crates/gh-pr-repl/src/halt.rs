//! Program-wide stops
//!
//! A `Halt` travels up from the resolver or the review loop to `main`,
//! which is the only place that turns it into a process exit.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Halt {
    /// The user pressed the quit key
    #[error("quit")]
    Quit,

    /// The user pressed Ctrl-C at the prompt
    #[error("interrupted")]
    Interrupted,

    /// No reference was given and the working directory has no PR
    #[error("! Couldn't find the current repo or branch.")]
    NoCurrentPullRequest,

    /// The last-resort strategy has no repository to work with
    #[error("! Couldn't find the current repo.")]
    NoCurrentRepository,

    /// No strategy could make sense of a reference
    #[error("× Couldn't parse '{0}'.")]
    Unresolved(String),

    /// Keystrokes can no longer be read
    #[error("! Couldn't read from the terminal: {0}")]
    Input(String),
}

impl Halt {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Quit => 0,
            Self::Interrupted
            | Self::NoCurrentPullRequest
            | Self::NoCurrentRepository
            | Self::Unresolved(_)
            | Self::Input(_) => 1,
        }
    }

    /// Message shown to the user before exiting, if any
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Self::Quit | Self::Interrupted => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Halt::Quit.exit_code(), 0);
        assert_eq!(Halt::Interrupted.exit_code(), 1);
        assert_eq!(Halt::NoCurrentPullRequest.exit_code(), 1);
        assert_eq!(Halt::NoCurrentRepository.exit_code(), 1);
        assert_eq!(Halt::Unresolved("x".to_string()).exit_code(), 1);
        assert_eq!(Halt::Input("eof".to_string()).exit_code(), 1);
    }

    #[test]
    fn test_diagnostic_names_the_reference() {
        assert_eq!(
            Halt::Unresolved("feat/login".to_string()).diagnostic(),
            Some("× Couldn't parse 'feat/login'.".to_string())
        );
        assert_eq!(Halt::Quit.diagnostic(), None);
        assert_eq!(Halt::Interrupted.diagnostic(), None);
    }
}
