//! Single keystroke input
//!
//! The review prompt reads exactly one key without waiting for Enter and
//! without echoing it. All crossterm input handling is isolated here.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io;

/// A keystroke as the review loop sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// Ctrl-C
    Interrupt,
}

/// Source of keystrokes
///
/// Production reads the terminal; tests replay a script.
pub trait KeySource {
    /// Block until one key is pressed
    fn read_key(&mut self) -> io::Result<Key>;
}

/// Raw mode for the lifetime of the guard
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::error!("Failed to restore terminal mode: {}", e);
        }
    }
}

/// Reads keys from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> io::Result<Key> {
        let _raw = RawModeGuard::enable()?;

        loop {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(key) = translate(key.code, key.modifiers) {
                    return Ok(key);
                }
            }
        }
    }
}

/// Map a crossterm key to a review key, `None` for keys without a character
fn translate(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Interrupt),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Char('\n')),
        KeyCode::Tab => Some(Key::Char('\t')),
        KeyCode::Esc => Some(Key::Char('\u{1b}')),
        _ => None,
    }
}
