use clap::{Parser, ValueEnum};

use crate::repl::SessionOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Prompt on stdin, print results on stdout
    #[default]
    Plain,
    /// Raw terminal line editor with history
    #[cfg(feature = "line")]
    Line,
    /// Full-screen interface
    #[cfg(feature = "tui")]
    Tui,
}

/// Postfix desk calculator
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Front-end to run
    #[arg(short, long, value_enum, default_value_t = Mode::Plain)]
    pub mode: Mode,

    /// Prompt written before each input line
    #[arg(short, long, default_value = ">> ")]
    pub prompt: String,

    /// Input line that ends the session
    #[arg(long, default_value = "exit")]
    pub exit_word: String,

    /// Do not print `no value` after a diagnostic
    #[arg(long)]
    pub suppress_no_value: bool,
}

impl Config {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            echo_no_value: !self.suppress_no_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_session() {
        let config = Config::try_parse_from(["pdacalc"]).unwrap();
        assert_eq!(config.mode, Mode::Plain);
        assert_eq!(config.prompt, ">> ");
        assert_eq!(config.exit_word, "exit");
        assert!(config.session_options().echo_no_value);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "pdacalc",
            "--prompt",
            "calc> ",
            "--exit-word",
            "quit",
            "--suppress-no-value",
        ])
        .unwrap();
        assert_eq!(config.prompt, "calc> ");
        assert_eq!(config.exit_word, "quit");
        assert!(!config.session_options().echo_no_value);
    }

    #[test]
    fn unknown_mode_is_refused() {
        assert!(Config::try_parse_from(["pdacalc", "--mode", "gui"]).is_err());
    }

    #[cfg(feature = "tui")]
    #[test]
    fn tui_mode_is_selectable_when_built() {
        let config = Config::try_parse_from(["pdacalc", "-m", "tui"]).unwrap();
        assert_eq!(config.mode, Mode::Tui);
    }
}
