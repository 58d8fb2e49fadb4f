use pdacalc::Diagnostic;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Splits a word into pieces no wider than `width` columns.
fn split_wide(word: &str, width: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let (mut begin, mut used) = (0, 0);
    for (at, c) in word.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(1);
        if used + w > width && at > begin {
            pieces.push(&word[begin..at]);
            begin = at;
            used = 0;
        }
        used += w;
    }
    pieces.push(&word[begin..]);
    pieces
}

/// Greedy word wrap by display width; over-long words are hard-split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for piece in text.split_whitespace().flat_map(|word| split_wide(word, width)) {
        let needed = if line.is_empty() { piece.width() } else { line.width() + 1 + piece.width() };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(piece);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Display-width padding that puts a caret under the diagnostic's column.
pub fn caret_padding(diagnostic: &Diagnostic) -> usize {
    let prefix: String = diagnostic.echo_line().chars().take(diagnostic.column).collect();
    prefix.width() + diagnostic.column.saturating_sub(prefix.chars().count())
}

#[derive(Clone, Copy, PartialEq)]
enum Run {
    None,
    Number,
    Name,
}

pub fn highlight_expression(expr: &str, base_style: Style) -> Vec<Span<'static>> {
    let name_style = Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::BOLD);

    let operator_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let number_style = Style::default().fg(Color::LightGreen);

    let mut spans = Vec::new();
    let mut current = String::new();
    let mut run = Run::None;

    let flush = |spans: &mut Vec<Span<'static>>, current: &mut String, run: Run| {
        if current.is_empty() {
            return;
        }
        let style = match run {
            Run::Number => number_style,
            Run::Name => name_style,
            Run::None => base_style,
        };
        spans.push(Span::styled(std::mem::take(current), style));
    };

    for c in expr.chars() {
        let next = if run == Run::Name && (c.is_alphabetic() || c.is_ascii_digit()) {
            Run::Name
        } else if c.is_alphabetic() {
            Run::Name
        } else if c.is_ascii_digit() || (run == Run::Number && c == '.') {
            Run::Number
        } else {
            Run::None
        };

        if next != run {
            flush(&mut spans, &mut current, run);
            run = next;
        }

        match next {
            Run::None => match c {
                '+' | '-' | '*' | '/' | '~' | '=' => {
                    spans.push(Span::styled(c.to_string(), operator_style));
                }
                ' ' => spans.push(Span::raw(" ")),
                _ => spans.push(Span::styled(c.to_string(), base_style)),
            },
            _ => current.push(c),
        }
    }
    flush(&mut spans, &mut current, run);

    spans
}
