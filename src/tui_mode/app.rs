use pdacalc::{Config, Diagnostic, EvalError, EvaluationTrace, Evaluator, ScriptedLines, Step, Tokenizer};
use std::time::{Duration, Instant};

const DETAILS_PREFIX: &str = "details ";

pub struct HistoryEntry {
    pub input: String,
    pub result: Result<f64, Diagnostic>,
    pub detailed_steps: Vec<Step>,
    pub detailed_mode: bool,
    pub duration: Duration,
}

/// The editable expression line. Positions are in chars.
#[derive(Debug, Default)]
pub struct InputLine {
    pub text: String,
    pub cursor: usize,
    pub scroll: usize,
}

impl InputLine {
    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn delete(&mut self) {
        let at = self.byte_index(self.cursor);
        if at < self.text.len() {
            self.text.remove(at);
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.delete();
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
        self.scroll = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Jumps to the start of the previous word.
    pub fn word_left(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor.min(chars.len());
        while pos > 0 && chars[pos - 1] == ' ' {
            pos -= 1;
        }
        while pos > 0 && chars[pos - 1] != ' ' {
            pos -= 1;
        }
        self.cursor = pos;
    }

    /// Jumps past the current word and the spaces after it.
    pub fn word_right(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor.min(chars.len());
        while pos < chars.len() && chars[pos] != ' ' {
            pos += 1;
        }
        while pos < chars.len() && chars[pos] == ' ' {
            pos += 1;
        }
        self.cursor = pos;
    }

    pub fn replace(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.char_len();
        self.scroll = 0;
    }

    pub fn clear(&mut self) {
        self.replace("");
    }

    /// Keeps the cursor inside a window `width` chars wide.
    pub fn fit_scroll(&mut self, width: usize) {
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if width > 0 && self.cursor >= self.scroll + width {
            self.scroll = self.cursor + 1 - width;
        }
    }
}

pub struct App {
    pub evaluator: Evaluator<ScriptedLines>,
    pub exit_word: String,
    pub input: InputLine,
    pub history: Vec<HistoryEntry>,
    pub cursor_history: usize,
    pub should_quit: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub list_height: usize,
    pub item_start_indices: Vec<usize>,
    pub history_scroll: usize,
    pub scroll_to_bottom: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let tokenizer = Tokenizer::new(ScriptedLines::new()).with_exit_word(config.exit_word.clone());
        App {
            evaluator: Evaluator::with_tokenizer(tokenizer),
            exit_word: config.exit_word.clone(),
            input: InputLine::default(),
            history: Vec::new(),
            cursor_history: 0,
            should_quit: false,
            show_help: false,
            help_scroll: 0,
            list_height: 5,
            item_start_indices: Vec::new(),
            history_scroll: 0,
            scroll_to_bottom: false,
        }
    }

    pub fn submit(&mut self) {
        let line = self.input.text.trim().to_string();
        if line.is_empty() {
            return;
        }
        if line == self.exit_word {
            self.should_quit = true;
            return;
        }

        match line.to_lowercase().as_str() {
            "clear" => {
                self.history.clear();
                self.cursor_history = 0;
                self.history_scroll = 0;
                self.input.clear();
                return;
            }
            "help" => {
                self.open_help();
                self.input.clear();
                return;
            }
            _ => {}
        }

        let (detailed_mode, expression) = match line.get(..DETAILS_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(DETAILS_PREFIX) => {
                (true, line[DETAILS_PREFIX.len()..].trim().to_string())
            }
            _ => (false, line),
        };
        if expression.is_empty() {
            self.input.clear();
            return;
        }

        if let Some(entry) = self.evaluate(expression, detailed_mode) {
            self.history.push(entry);
            self.cursor_history = self.history.len() - 1;
            self.scroll_to_bottom = true;
        }
        self.input.clear();
    }

    fn evaluate(&mut self, expression: String, detailed_mode: bool) -> Option<HistoryEntry> {
        let started = Instant::now();
        let mut trace = EvaluationTrace::new(detailed_mode);

        self.evaluator.source_mut().push_line(expression.clone());
        let result = match self.evaluator.evaluate_traced(&mut trace) {
            Ok(value) => Ok(value),
            Err(EvalError::Rejected(diagnostic)) => Err(diagnostic),
            Err(EvalError::Input(err)) => {
                log::info!("input closed: {}", err);
                self.should_quit = true;
                return None;
            }
        };

        Some(HistoryEntry {
            input: expression,
            result,
            detailed_steps: trace.steps,
            detailed_mode,
            duration: started.elapsed(),
        })
    }

    pub fn open_help(&mut self) {
        self.show_help = true;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
        self.help_scroll = 0;
    }

    /// Moves the history selection by `delta` entries and recalls its input.
    pub fn select_history(&mut self, delta: isize) {
        if self.history.is_empty() {
            return;
        }
        let last = self.history.len() - 1;
        self.cursor_history = self.cursor_history.saturating_add_signed(delta).min(last);
        let recalled = self.history[self.cursor_history].input.clone();
        self.input.replace(&recalled);
        self.scroll_to_bottom = false;
    }

    pub fn page_history(&mut self, direction: isize) {
        let step = self.list_height.saturating_sub(1).max(1) as isize;
        self.select_history(direction * step);
    }
}
