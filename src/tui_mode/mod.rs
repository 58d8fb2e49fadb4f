pub mod app;
mod helpers;
mod ui;

use anyhow::Result;
use app::App;
use crossterm::{
    cursor::{SetCursorStyle, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use pdacalc::Config;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

type Screen = Terminal<CrosstermBackend<Stdout>>;

/// Runs the full-screen calculator until the user quits.
pub(crate) fn run_tui(config: &Config) -> Result<()> {
    let mut screen = enter_screen()?;
    let mut app = App::new(config);

    let outcome = ui::run_ui_loop(&mut screen, &mut app);
    leave_screen(&mut screen)?;
    log::info!("session closed after {} evaluations", app.history.len());
    outcome
}

fn enter_screen() -> Result<Screen> {
    terminal::enable_raw_mode()?;
    let mut out = io::stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture, SetCursorStyle::BlinkingBar)?;
    log::debug!("entered alternate screen");
    Ok(Terminal::new(CrosstermBackend::new(out))?)
}

fn leave_screen(screen: &mut Screen) -> Result<()> {
    execute!(
        screen.backend_mut(),
        SetCursorStyle::DefaultUserShape,
        Show,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;
    log::debug!("restored terminal");
    Ok(())
}
