//! # Tokenizer
//!
//! Turns the characters of the current input line into [`Token`]s.
//!
//! The tokenizer holds exactly one line at a time in a [`LineCursor`]. When
//! the cursor runs off the end, the next line is pulled from the
//! [`LineSource`] and a `\n` is appended, so every line ends in an
//! [`Token::EndOfLine`]. Numbers and identifiers are scanned greedily; the
//! character that stops the scan is pushed back so the next token starts
//! on it.
use crate::error::{CursorError, InputError};
use crate::source::LineSource;
use crate::token::Token;

/// The current raw line and a read position inside it.
///
/// At most one character can be pushed back between reads.
#[derive(Debug, Default)]
pub struct LineCursor {
    line: String,
    index: usize,
    last_width: Option<usize>,
}

impl LineCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the buffer with `line` plus a trailing newline.
    pub fn load(&mut self, line: &str) {
        self.line.clear();
        self.line.push_str(line);
        self.line.push('\n');
        self.index = 0;
        self.last_width = None;
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.line.len()
    }

    pub fn advance(&mut self) -> Option<char> {
        let c = self.line[self.index..].chars().next()?;
        self.index += c.len_utf8();
        self.last_width = Some(c.len_utf8());
        Some(c)
    }

    pub fn unread(&mut self) -> Result<(), CursorError> {
        let width = self.last_width.take().ok_or(CursorError::NothingToUnread)?;
        self.index -= width;
        Ok(())
    }

    /// Skips the rest of the line.
    pub fn flush(&mut self) {
        self.index = self.line.len();
        self.last_width = None;
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    /// Number of characters consumed so far.
    pub fn position(&self) -> usize {
        self.line[..self.index].chars().count()
    }
}

pub struct Tokenizer<S> {
    source: S,
    cursor: LineCursor,
    text: String,
    exit_word: Option<String>,
}

impl<S: LineSource> Tokenizer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cursor: LineCursor::new(),
            text: String::new(),
            exit_word: None,
        }
    }

    /// A source line exactly equal to `word` ends the session.
    pub fn with_exit_word(mut self, word: impl Into<String>) -> Self {
        self.exit_word = Some(word.into());
        self
    }

    pub fn next_token(&mut self) -> Result<Token, InputError> {
        let mut c = self.next_char()?;
        while c == ' ' {
            c = self.next_char()?;
        }

        self.text.clear();
        self.text.push(c);

        let token = if let Some(op) = Token::operator(c) {
            op
        } else if c.is_ascii_digit() {
            self.scan_number()?
        } else if c.is_alphabetic() {
            self.scan_variable()?
        } else {
            Token::Invalid(c)
        };

        log::trace!(
            "token {:?} text {:?} at {}",
            token,
            self.text,
            self.cursor.position()
        );
        Ok(token)
    }

    fn scan_number(&mut self) -> Result<Token, InputError> {
        let mut seen_dot = false;
        loop {
            let c = self.next_char()?;
            match c {
                '0'..='9' => self.text.push(c),
                '.' if !seen_dot => {
                    seen_dot = true;
                    self.text.push(c);
                }
                _ => break,
            }
        }
        self.cursor.unread()?;

        let first = self.text.chars().next().unwrap_or('0');
        Ok(self
            .text
            .parse::<f64>()
            .map_or(Token::Invalid(first), Token::Number))
    }

    fn scan_variable(&mut self) -> Result<Token, InputError> {
        loop {
            let c = self.next_char()?;
            if c.is_alphabetic() || c.is_ascii_digit() {
                self.text.push(c);
            } else {
                break;
            }
        }
        self.cursor.unread()?;
        Ok(Token::Variable(self.text.clone()))
    }

    /// Next raw character, pulling a fresh line when the current one is spent.
    pub fn next_char(&mut self) -> Result<char, InputError> {
        if self.cursor.is_exhausted() {
            self.refill()?;
        }
        self.cursor.advance().ok_or(InputError::EndOfInput)
    }

    fn refill(&mut self) -> Result<(), InputError> {
        let line = self.source.next_line()?.ok_or(InputError::EndOfInput)?;
        if self.exit_word.as_deref() == Some(line.as_str()) {
            log::debug!("exit sentinel {:?} read", line);
            return Err(InputError::Exit);
        }
        self.cursor.load(&line);
        Ok(())
    }

    pub fn unread(&mut self) -> Result<(), CursorError> {
        self.cursor.unread()
    }

    pub fn flush(&mut self) {
        self.cursor.flush();
    }

    pub fn current_line(&self) -> &str {
        self.cursor.line()
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Text of the most recent token.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedLines;

    fn tokenizer(lines: &[&str]) -> Tokenizer<ScriptedLines> {
        Tokenizer::new(lines.iter().copied().collect())
    }

    fn line_tokens(tok: &mut Tokenizer<ScriptedLines>) -> Vec<Token> {
        let mut out = Vec::new();
        loop {
            let t = tok.next_token().unwrap();
            let done = t == Token::EndOfLine;
            out.push(t);
            if done {
                return out;
            }
        }
    }

    #[test]
    fn digit_scan_pushes_back_the_operator() {
        let mut tok = tokenizer(&["12.5+3"]);
        assert_eq!(
            line_tokens(&mut tok),
            vec![
                Token::Number(12.5),
                Token::Add,
                Token::Number(3.0),
                Token::EndOfLine
            ]
        );
    }

    #[test]
    fn spaces_are_skipped_and_operators_recognized() {
        let mut tok = tokenizer(&["  x = 4 ~ 2 - 3 * 1 /"]);
        assert_eq!(
            line_tokens(&mut tok),
            vec![
                Token::Variable("x".into()),
                Token::Assign,
                Token::Number(4.0),
                Token::Negate,
                Token::Number(2.0),
                Token::Subtract,
                Token::Number(3.0),
                Token::Multiply,
                Token::Number(1.0),
                Token::Divide,
                Token::EndOfLine,
            ]
        );
    }

    #[test]
    fn identifiers_mix_letters_and_digits() {
        let mut tok = tokenizer(&["abc12d 7"]);
        assert_eq!(tok.next_token().unwrap(), Token::Variable("abc12d".into()));
        assert_eq!(tok.text(), "abc12d");
        assert_eq!(tok.next_token().unwrap(), Token::Number(7.0));
    }

    #[test]
    fn digits_then_letters_split_into_two_tokens() {
        let mut tok = tokenizer(&["3x"]);
        assert_eq!(tok.next_token().unwrap(), Token::Number(3.0));
        assert_eq!(tok.next_token().unwrap(), Token::Variable("x".into()));
    }

    #[test]
    fn second_dot_ends_a_number() {
        let mut tok = tokenizer(&["1.2.3"]);
        assert_eq!(
            line_tokens(&mut tok),
            vec![
                Token::Number(1.2),
                Token::Invalid('.'),
                Token::Number(3.0),
                Token::EndOfLine
            ]
        );
    }

    #[test]
    fn trailing_dot_is_part_of_the_number() {
        let mut tok = tokenizer(&["3."]);
        assert_eq!(tok.next_token().unwrap(), Token::Number(3.0));
        assert_eq!(tok.text(), "3.");
    }

    #[test]
    fn unknown_characters_are_invalid_tokens() {
        let mut tok = tokenizer(&["#\t"]);
        assert_eq!(tok.next_token().unwrap(), Token::Invalid('#'));
        assert_eq!(tok.text(), "#");
        assert_eq!(tok.next_token().unwrap(), Token::Invalid('\t'));
        assert_eq!(tok.next_token().unwrap(), Token::EndOfLine);
    }

    #[test]
    fn empty_line_is_just_end_of_line() {
        let mut tok = tokenizer(&["", "1"]);
        assert_eq!(tok.next_token().unwrap(), Token::EndOfLine);
        assert_eq!(tok.next_token().unwrap(), Token::Number(1.0));
    }

    #[test]
    fn exhausted_source_signals_end_of_input() {
        let mut tok = tokenizer(&["1"]);
        line_tokens(&mut tok);
        assert!(matches!(tok.next_token(), Err(InputError::EndOfInput)));
    }

    #[test]
    fn exit_word_stops_the_tokenizer() {
        let mut tok = tokenizer(&["2", "exit", "3"]).with_exit_word("exit");
        line_tokens(&mut tok);
        assert!(matches!(tok.next_token(), Err(InputError::Exit)));
    }

    #[test]
    fn exit_word_must_match_the_whole_line() {
        let mut tok = tokenizer(&["exit 1"]).with_exit_word("exit");
        assert_eq!(tok.next_token().unwrap(), Token::Variable("exit".into()));
    }

    #[test]
    fn flush_discards_the_rest_of_the_line() {
        let mut tok = tokenizer(&["1 2 3", "9"]);
        assert_eq!(tok.next_token().unwrap(), Token::Number(1.0));
        tok.flush();
        assert_eq!(tok.next_token().unwrap(), Token::Number(9.0));
    }

    #[test]
    fn position_and_line_track_the_cursor() {
        let mut tok = tokenizer(&["ab + 1"]);
        tok.next_token().unwrap();
        assert_eq!(tok.current_line(), "ab + 1\n");
        assert_eq!(tok.position(), 2);
        tok.next_token().unwrap();
        assert_eq!(tok.position(), 4);
    }

    #[test]
    fn only_one_character_may_be_unread() {
        let mut tok = tokenizer(&["xy"]);
        assert_eq!(tok.next_char().unwrap(), 'x');
        assert_eq!(tok.next_char().unwrap(), 'y');
        tok.unread().unwrap();
        assert_eq!(tok.unread(), Err(CursorError::NothingToUnread));
        assert_eq!(tok.next_char().unwrap(), 'y');
    }

    #[test]
    fn cursor_unread_before_any_read_fails() {
        let mut cursor = LineCursor::new();
        cursor.load("z");
        assert_eq!(cursor.unread(), Err(CursorError::NothingToUnread));
        assert_eq!(cursor.advance(), Some('z'));
        assert_eq!(cursor.advance(), Some('\n'));
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn cursor_position_counts_characters_not_bytes() {
        let mut cursor = LineCursor::new();
        cursor.load("été");
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.position(), 2);
        cursor.unread().unwrap();
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn unicode_letters_start_identifiers() {
        let mut tok = tokenizer(&["λx2 1"]);
        assert_eq!(tok.next_token().unwrap(), Token::Variable("λx2".into()));
    }
}
