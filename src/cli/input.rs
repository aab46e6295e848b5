//! Keystroke input handling using crossterm
//!
//! Features:
//! - Non-blocking keystroke capture with a short poll timeout
//! - Choice keys (1/2 or left/right arrows) mapped to pair positions
//! - Ctrl+C / Escape / q graceful exit

use crossterm::event::{self, KeyCode, KeyEvent, KeyModifiers};
use std::io::Result as IoResult;
use std::time::Duration;

/// Handles user input from terminal
pub struct InputHandler {
    /// Timeout for poll operations (milliseconds)
    poll_timeout: Duration,
}

impl InputHandler {
    /// Create new input handler with default timeout (50ms for responsive input)
    pub fn new() -> Self {
        InputHandler {
            poll_timeout: Duration::from_millis(50),
        }
    }

    /// Enable raw mode for terminal input
    pub fn enable_raw_mode() -> IoResult<()> {
        crossterm::terminal::enable_raw_mode()
    }

    /// Disable raw mode and restore terminal
    pub fn disable_raw_mode() -> IoResult<()> {
        crossterm::terminal::disable_raw_mode()
    }

    /// Poll for keystroke with timeout (non-blocking)
    /// Returns Some(KeyEvent) if key pressed, None if timeout
    pub fn read_key(&self) -> Result<Option<KeyEvent>, Box<dyn std::error::Error>> {
        if event::poll(self.poll_timeout)? {
            match event::read()? {
                event::Event::Key(key_event) => Ok(Some(key_event)),
                _ => Ok(None),
            }
        } else {
            Ok(None)
        }
    }

    /// Check if key event is an exit signal (Ctrl+C, Escape, or q)
    pub fn is_exit(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Char('q') => true,
            KeyCode::Esc => true,
            _ => false,
        }
    }

    /// Map a key to a pair position: 0 (left) or 1 (right)
    pub fn choice_index(key: &KeyEvent) -> Option<usize> {
        if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT)
        {
            return None;
        }
        match key.code {
            KeyCode::Char('1') | KeyCode::Left => Some(0),
            KeyCode::Char('2') | KeyCode::Right => Some(1),
            _ => None,
        }
    }

    /// Check if key is enter/return (start the game)
    pub fn is_start(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Enter)
    }

    /// Check if key is the play-again shortcut
    pub fn is_play_again(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
