//! Where input lines come from.
//!
//! The tokenizer pulls one line at a time through [`LineSource`]. A source
//! returns lines without their terminator and `None` once it is exhausted.
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

pub trait LineSource {
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        (**self).next_line()
    }
}

/// Writes a prompt, then blocks for a line from a buffered reader.
pub struct Prompted<R, W> {
    reader: R,
    writer: W,
    prompt: String,
}

impl<R: BufRead, W: Write> Prompted<R, W> {
    pub fn new(reader: R, writer: W, prompt: impl Into<String>) -> Self {
        Self {
            reader,
            writer,
            prompt: prompt.into(),
        }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: BufRead, W: Write> LineSource for Prompted<R, W> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        write!(self.writer, "{}", self.prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

/// An in-memory queue of lines, fed by whoever owns it.
#[derive(Debug, Default)]
pub struct ScriptedLines {
    lines: VecDeque<String>,
}

impl ScriptedLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }

    pub fn pending(&self) -> usize {
        self.lines.len()
    }
}

impl<T: Into<String>> FromIterator<T> for ScriptedLines {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for ScriptedLines {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompted_writes_prompt_before_each_read() {
        let input = io::Cursor::new("3 4 +\r\nx\n");
        let mut src = Prompted::new(input, Vec::new(), ">> ");

        assert_eq!(src.next_line().unwrap().as_deref(), Some("3 4 +"));
        assert_eq!(src.next_line().unwrap().as_deref(), Some("x"));
        assert_eq!(src.next_line().unwrap(), None);

        let (_, out) = src.into_parts();
        assert_eq!(String::from_utf8(out).unwrap(), ">> >> >> ");
    }

    #[test]
    fn prompted_keeps_a_final_line_without_newline() {
        let mut src = Prompted::new(io::Cursor::new("y"), io::sink(), "");
        assert_eq!(src.next_line().unwrap().as_deref(), Some("y"));
        assert_eq!(src.next_line().unwrap(), None);
    }

    #[test]
    fn scripted_lines_drain_in_order() {
        let mut src: ScriptedLines = ["a", "b"].into_iter().collect();
        src.push_line("c");
        assert_eq!(src.pending(), 3);
        assert_eq!(src.next_line().unwrap().as_deref(), Some("a"));
        assert_eq!(src.next_line().unwrap().as_deref(), Some("b"));
        assert_eq!(src.next_line().unwrap().as_deref(), Some("c"));
        assert_eq!(src.next_line().unwrap(), None);
    }
}
