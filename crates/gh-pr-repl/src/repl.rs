//! Review loop
//!
//! The outer loop walks the resolved pull requests; the inner loop reads one
//! key at a time and runs the bound command until a command ends the
//! session for the current PR.

use crate::commands::{self, CommandContext, Flow};
use crate::desktop::Desktop;
use crate::halt::Halt;
use crate::keymap::Keymap;
use crate::keys::{Key, KeySource};
use crate::reference::PrReference;
use crate::resolver::ReferenceResolver;
use crossterm::style::Stylize;
use gh_client::GitHubClient;
use gh_pr_repl_config::AppConfig;
use log::{debug, error, info};
use std::fmt::Display;
use std::io::Write;

pub struct Repl<'a, K: KeySource, W: Write> {
    config: AppConfig,
    client: &'a dyn GitHubClient,
    desktop: &'a dyn Desktop,
    keys: K,
    out: W,
    keymap: Keymap,
}

impl<'a, K: KeySource, W: Write> Repl<'a, K, W> {
    /// Create the loop and register every command
    pub fn new(
        config: AppConfig,
        client: &'a dyn GitHubClient,
        desktop: &'a dyn Desktop,
        keys: K,
        out: W,
    ) -> Self {
        let keymap = Keymap::default();
        debug!("Registered {} commands", keymap.bindings().count());

        Self {
            config,
            client,
            desktop,
            keys,
            out,
            keymap,
        }
    }

    /// Review `references`, or the PR of the working directory when empty
    ///
    /// Everything is resolved before the first prompt.
    pub fn main(&mut self, references: &[String]) -> Result<(), Halt> {
        let resolved = ReferenceResolver::new(self.client).resolve_all(references)?;
        info!("Reviewing {} pull request(s)", resolved.len());

        for pr in &resolved {
            self.process_reference(pr)?;
        }

        Ok(())
    }

    /// Run the key loop for one PR until it ends its session
    pub fn process_reference(&mut self, pr: &PrReference) -> Result<(), Halt> {
        let mut continue_session = true;

        if !self.config.show_all && pr.is_closed() {
            info!("Skipping closed {}", pr);
            self.say(format!("✓ {}", pr).green());
            return Ok(());
        }

        info!("Reviewing {}", pr);
        self.say(format!("- {}", pr).yellow());

        while continue_session {
            let input = self.fetch_input(pr)?;
            match self.process_input(pr, input) {
                Flow::Stay => {}
                Flow::Next => continue_session = false,
                Flow::Quit => return Err(Halt::Quit),
            }
        }

        Ok(())
    }

    /// Prompt and block for one key
    fn fetch_input(&mut self, pr: &PrReference) -> Result<char, Halt> {
        if let Err(e) = write!(self.out, "{} > ", pr.location()).and_then(|_| self.out.flush()) {
            error!("Failed to write prompt: {}", e);
        }

        match self.keys.read_key() {
            Ok(Key::Char(c)) => Ok(c),
            Ok(Key::Interrupt) => {
                info!("Interrupted while reviewing {}", pr);
                self.say("");
                Err(Halt::Interrupted)
            }
            Err(e) => {
                error!("Failed to read key: {}", e);
                self.say("");
                Err(Halt::Input(e.to_string()))
            }
        }
    }

    /// Dispatch one key to its command
    pub fn process_input(&mut self, pr: &PrReference, input: char) -> Flow {
        let Some(command) = self.keymap.lookup(input) else {
            debug!("Unrecognized key {:?}", input);
            self.say(format!("Unrecognized command {}, press 'h' for help.", input));
            return Flow::Stay;
        };

        // Display the full command name once matched
        self.say(command.name());
        debug!("Running {} for {}", command.name(), pr);

        let mut ctx = CommandContext {
            pr,
            client: self.client,
            desktop: self.desktop,
            config: &self.config,
            keymap: &self.keymap,
            out: &mut self.out,
        };

        match commands::execute(command, &mut ctx) {
            Ok(flow) => flow,
            Err(e) => {
                error!("{} failed for {}: {:#}", command.name(), pr, e);
                self.say(format!("{} failed: {}", command.name(), e).red());
                Flow::Stay
            }
        }
    }

    fn say(&mut self, line: impl Display) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            error!("Failed to write output: {}", e);
        }
    }

    #[cfg(test)]
    fn keys(&self) -> &K {
        &self.keys
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.out
    }
}
