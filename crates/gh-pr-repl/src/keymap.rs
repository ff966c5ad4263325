//! Keymap
//!
//! Maps a single keystroke to a review command and renders the help list.
//! The keymap is built once from the command catalogue and never changes.

use crate::command_id::CommandId;
use std::collections::HashMap;
use strum::IntoEnumIterator;

/// A single binding from a trigger key to a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBinding {
    pub trigger: char,
    /// Help line for the UI
    pub help: String,
    pub command: CommandId,
}

impl CommandBinding {
    pub fn new(command: CommandId) -> Self {
        Self {
            trigger: command.trigger(),
            help: command.help(),
            command,
        }
    }
}

/// The keymap - a collection of bindings with lookup by trigger
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<CommandBinding>,
    by_trigger: HashMap<char, CommandId>,
}

impl Keymap {
    /// Create a keymap from a list of commands
    ///
    /// When two commands share a trigger the first one keeps it and the
    /// second is left unregistered.
    pub fn new(commands: impl IntoIterator<Item = CommandId>) -> Self {
        let mut bindings = Vec::new();
        let mut by_trigger = HashMap::new();

        for command in commands {
            let binding = CommandBinding::new(command);
            if let Some(existing) = by_trigger.get(&binding.trigger) {
                log::error!(
                    "Trigger '{}' of {:?} is already bound to {:?}",
                    binding.trigger,
                    command,
                    existing
                );
                continue;
            }
            by_trigger.insert(binding.trigger, command);
            bindings.push(binding);
        }

        Self {
            bindings,
            by_trigger,
        }
    }

    /// Look up the command bound to `trigger`
    pub fn lookup(&self, trigger: char) -> Option<CommandId> {
        self.by_trigger.get(&trigger).copied()
    }

    /// Get all bindings in registration order
    pub fn bindings(&self) -> impl Iterator<Item = &CommandBinding> {
        self.bindings.iter()
    }

    /// Help listing, one `<trigger> - <help>` line per command
    pub fn help(&self) -> String {
        self.bindings
            .iter()
            .map(|binding| format!("{} - {}", binding.trigger, binding.help))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Keymap {
    /// Keymap with every known command
    fn default() -> Self {
        Self::new(CommandId::iter())
    }
}
