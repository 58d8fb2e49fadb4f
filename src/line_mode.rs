use anyhow::Result;
use pdacalc::{repl, Config, Evaluator, LineSource, Tokenizer};
use std::io::{self, stdin, stdout, Write};
use termion::{
    clear::CurrentLine as ClearLine,
    cursor::{DetectCursorPos, Goto},
    event::Key,
    input::TermRead,
    raw::IntoRawMode,
};
use unicode_width::UnicodeWidthStr;

fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or_else(|| s.len())
}

fn remove_char_at(s: &mut String, char_index: usize) {
    let byte_idx = char_index_to_byte_index(s, char_index);
    if let Some(c) = s[byte_idx..].chars().next() {
        s.drain(byte_idx..byte_idx + c.len_utf8());
    }
}

/// Reads lines in raw mode with in-place editing and history recall.
///
/// Raw mode is held only while a line is being typed.
pub struct LineEditor {
    prompt: String,
    history: Vec<String>,
}

impl LineEditor {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            history: Vec::new(),
        }
    }
}

impl LineSource for LineEditor {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut stdout = stdout().into_raw_mode()?;
        write!(stdout, "{}{}", ClearLine, self.prompt)?;
        stdout.flush()?;

        let mut expression = String::new();
        let mut cursor_pos = 0; // in chars
        let mut history_index = self.history.len();
        let (_, initial_y) = stdout.cursor_pos()?;
        let prompt_width = self.prompt.width();

        let stdin = stdin();
        let mut keys = stdin.keys();

        loop {
            write!(
                stdout,
                "{}{}{}{}",
                Goto(1, initial_y),
                ClearLine,
                self.prompt,
                expression
            )?;

            let prefix: String = expression.chars().take(cursor_pos).collect();
            let column = 1 + prompt_width + prefix.width();
            write!(stdout, "{}", Goto(column as u16, initial_y))?;
            stdout.flush()?;

            let key = match keys.next() {
                Some(key) => key?,
                None => {
                    write!(stdout, "\r\n")?;
                    return Ok(None);
                }
            };

            match key {
                Key::Char('\n') => break,
                Key::Ctrl('d') if expression.is_empty() => {
                    write!(stdout, "\r\n")?;
                    return Ok(None);
                }
                Key::Ctrl('c') => {
                    write!(stdout, "\r\n")?;
                    return Ok(None);
                }
                Key::Char(c) => {
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    expression.insert(byte_idx, c);
                    cursor_pos += 1;
                }
                Key::Backspace if cursor_pos > 0 => {
                    cursor_pos -= 1;
                    remove_char_at(&mut expression, cursor_pos);
                }
                Key::Delete if cursor_pos < expression.chars().count() => {
                    remove_char_at(&mut expression, cursor_pos);
                }
                Key::Left if cursor_pos > 0 => cursor_pos -= 1,
                Key::Right if cursor_pos < expression.chars().count() => cursor_pos += 1,
                Key::Home => cursor_pos = 0,
                Key::End => cursor_pos = expression.chars().count(),
                Key::Up => {
                    if history_index > 0 {
                        history_index -= 1;
                        expression = self.history[history_index].clone();
                        cursor_pos = expression.chars().count();
                    }
                }
                Key::Down => {
                    if history_index < self.history.len().saturating_sub(1) {
                        history_index += 1;
                        expression = self.history[history_index].clone();
                        cursor_pos = expression.chars().count();
                    } else {
                        history_index = self.history.len();
                        expression.clear();
                        cursor_pos = 0;
                    }
                }
                _ => {}
            }
        }

        write!(stdout, "\r\n")?;
        stdout.flush()?;
        drop(stdout);

        if !expression.trim().is_empty() {
            self.history.push(expression.clone());
        }
        Ok(Some(expression))
    }
}

pub fn run_line(config: &Config) -> Result<()> {
    println!("Postfix Calculator");
    println!("Operators: + - * / and ~ (negate), e.g. `3 4 +`, `x = 2 ~`");
    println!("Navigation: ←/→, Backspace/Delete, Home/End, ↑/↓ for history");
    println!("Type '{}' or press Ctrl+D to quit\n", config.exit_word);

    let editor = LineEditor::new(config.prompt.clone());
    let tokenizer = Tokenizer::new(editor).with_exit_word(config.exit_word.clone());
    let mut evaluator = Evaluator::with_tokenizer(tokenizer);

    let end = repl::run(&mut evaluator, &mut io::stdout(), &config.session_options())?;
    log::debug!("line mode finished: {:?}", end);
    Ok(())
}
