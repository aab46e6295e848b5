//! Terminal display and UI rendering
//!
//! Features:
//! - Intro screen with game rules
//! - Scoreboard with round counter and remaining hearts
//! - Image pair panel with staged (spoiler-free) file names
//! - Color-coded round feedback and final result screen

#[allow(unused_imports)]
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};

use crate::cli::share::ShareLink;

/// Terminal display manager
pub struct Display {
    /// Whether we're using alternate screen
    use_alternate_screen: bool,
}

impl Display {
    /// Create display without alternate screen (simpler mode)
    pub fn simple() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Display {
            use_alternate_screen: false,
        })
    }

    /// Clear screen
    pub fn clear(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Intro screen shown before the first round
    pub fn show_intro(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 1),
            SetForegroundColor(Color::Cyan),
            Print("🤖 Real or AI?\n\n"),
            ResetColor,
            Print("Do you believe you can tell AI images apart?\n"),
            Print("The world is changing fast.\n"),
            SetForegroundColor(Color::Yellow),
            Print("⚠️  Don't let the AI fool you.\n\n"),
            ResetColor,
            SetForegroundColor(Color::DarkGrey),
            Print("Press ENTER to start  |  q to quit\n"),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Scoreboard: score, round counter, and remaining hearts
    pub fn show_scoreboard(
        &self,
        score: u32,
        round: u32,
        total_rounds: u32,
        lives_remaining: u32,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 1),
            SetForegroundColor(Color::Cyan),
            Print("🧐 Find the real photo!\n"),
            ResetColor,
            Print(format!("Score: {}  |  Round: {}/{}  |  Lives: ", score, round, total_rounds)),
            SetForegroundColor(if lives_remaining > 1 {
                Color::Red
            } else {
                Color::DarkRed
            }),
            Print("❤️ ".repeat(lives_remaining as usize)),
            ResetColor,
            Print("\n"),
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// The round's image pair, by position
    pub fn show_pair(
        &self,
        left_label: &str,
        right_label: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 4),
            SetForegroundColor(Color::Magenta),
            Print("[1] "),
            ResetColor,
            Print(left_label),
            Print("\n"),
            SetForegroundColor(Color::Magenta),
            Print("[2] "),
            ResetColor,
            Print(right_label),
            Print("\n"),
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Round feedback, green for a correct pick and red for a wrong one
    pub fn show_feedback(
        &self,
        message: &str,
        correct: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 7),
            SetForegroundColor(if correct { Color::Green } else { Color::Red }),
            Print(message),
            ResetColor,
            Print("\n"),
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Final result screen
    pub fn show_final(
        &self,
        score: u32,
        total_rounds: u32,
        message: &str,
        safe: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 1),
            SetForegroundColor(Color::Blue),
            Print("─".repeat(50)),
            Print("\n"),
            ResetColor,
            Print("🎯 Final result\n"),
            Print(format!("Final score: {}/{}\n", score, total_rounds)),
            SetForegroundColor(if safe { Color::Green } else { Color::Red }),
            Print(message),
            ResetColor,
            Print("\n"),
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Share links for the finished session
    pub fn show_share_links(&self, links: &[ShareLink]) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 6),
            SetForegroundColor(Color::Magenta),
            Print("📤 Share your result:\n"),
            ResetColor,
        )?;
        for link in links {
            execute!(stdout, Print(format!("  {}  {}\n", link.label, link.url)))?;
        }
        execute!(
            stdout,
            SetForegroundColor(Color::DarkGrey),
            Print("\nPress r to play again  |  q to quit\n"),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Show help text
    pub fn show_help(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 9),
            SetForegroundColor(Color::DarkGrey),
            Print("Press 1/2 (or ←/→) to pick the real photo  |  q to quit\n"),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Reset terminal state and cleanup
    pub fn shutdown(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        if self.use_alternate_screen {
            execute!(stdout, LeaveAlternateScreen, cursor::Show,)?;
        }

        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Default for Display {
    fn default() -> Self {
        // Return simple display that doesn't use alternate screen
        Display {
            use_alternate_screen: false,
        }
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // Best effort cleanup
        let _ = self.shutdown();
    }
}
