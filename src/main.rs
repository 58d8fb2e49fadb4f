#[cfg(feature = "line")]
mod line_mode;
#[cfg(feature = "tui")]
mod render_help;
#[cfg(feature = "tui")]
mod tui_mode;

use anyhow::Result;
use clap::Parser;
use pdacalc::{repl, Config, Mode};

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::parse();
    log::debug!("starting with {:?}", config);

    match config.mode {
        Mode::Plain => {
            repl::run_stdio(&config)?;
        }
        #[cfg(feature = "line")]
        Mode::Line => line_mode::run_line(&config)?,
        #[cfg(feature = "tui")]
        Mode::Tui => tui_mode::run_tui(&config)?,
    }
    Ok(())
}
