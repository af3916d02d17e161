//! Terminal setup and management
//!
//! Handles terminal initialization, restoration, and provides RAII guards
//! for safe cleanup on exit or panic. Mouse capture is required: clicks
//! open boxes and drags move them.

use crate::errors::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{stdout, Stdout};

/// Type alias for our terminal backend
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize terminal for TUI mode
///
/// Sets up raw mode, alternate screen, mouse capture and hides the cursor.
///
/// # Errors
/// Returns error if terminal setup fails (e.g., not a TTY).
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Restore terminal to normal state
///
/// Safe to call multiple times.
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(
        stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        cursor::Show
    )?;
    Ok(())
}

/// RAII guard that restores terminal state on drop
///
/// Leaving raw mode and mouse capture on after a panic would leave the
/// user's shell unusable.
pub struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore();
    }
}
