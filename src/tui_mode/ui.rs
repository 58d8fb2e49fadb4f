use super::app::{App, HistoryEntry};
use super::helpers::{caret_padding, highlight_expression, wrap_text};
use crate::render_help::render_help;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use pdacalc::format_value;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::Stdout;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

const MIN_SIZE: (u16, u16) = (50, 10);
const VARIABLES_WIDTH: u16 = 24;
const POLL_INTERVAL: Duration = Duration::from_millis(50);
const WHEEL_STEP: usize = 3;
const HELP_PAGE: usize = 10;
const STEP_INDENT: &str = "    ";

fn fg(color: Color) -> Style {
    Style::default().fg(color)
}

fn bold(color: Color) -> Style {
    fg(color).add_modifier(Modifier::BOLD)
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(fg(Color::DarkGray))
        .title(title)
        .title_alignment(Alignment::Center)
}

pub fn run_ui_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| {
            if app.show_help {
                render_help(frame, app);
            } else {
                draw(frame, app);
            }
        })?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.show_help {
                    help_key(app, key.code);
                } else {
                    editor_key(app, key.code, key.modifiers);
                }
            }
            Event::Mouse(mouse) => wheel(app, mouse),
            _ => {}
        }
    }
    Ok(())
}

fn help_key(app: &mut App, code: KeyCode) {
    let scroll = app.help_scroll;
    match code {
        KeyCode::Down => app.help_scroll = scroll + 1,
        KeyCode::Up => app.help_scroll = scroll.saturating_sub(1),
        KeyCode::PageDown => app.help_scroll = scroll + HELP_PAGE,
        KeyCode::PageUp => app.help_scroll = scroll.saturating_sub(HELP_PAGE),
        KeyCode::Esc => app.close_help(),
        _ => {}
    }
}

fn editor_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    match (code, ctrl) {
        (KeyCode::Char('c') | KeyCode::Char('d'), true) => app.should_quit = true,
        (KeyCode::Char('u') | KeyCode::Char('U'), true) => app.input.clear(),
        (KeyCode::Char(c), false) => app.input.insert(c),
        (KeyCode::Left, true) => app.input.word_left(),
        (KeyCode::Right, true) => app.input.word_right(),
        (KeyCode::Left, false) => app.input.left(),
        (KeyCode::Right, false) => app.input.right(),
        (KeyCode::Home, _) => app.input.home(),
        (KeyCode::End, _) => app.input.end(),
        (KeyCode::Backspace, _) => app.input.backspace(),
        (KeyCode::Delete, _) => app.input.delete(),
        (KeyCode::Up, _) => app.select_history(-1),
        (KeyCode::Down, _) => app.select_history(1),
        (KeyCode::PageUp, _) => app.page_history(-1),
        (KeyCode::PageDown, _) => app.page_history(1),
        (KeyCode::Enter, _) => app.submit(),
        (KeyCode::F(1), _) => app.open_help(),
        _ => {}
    }
}

fn wheel(app: &mut App, mouse: MouseEvent) {
    let offset = if app.show_help {
        &mut app.help_scroll
    } else {
        &mut app.history_scroll
    };
    match mouse.kind {
        MouseEventKind::ScrollDown => *offset += WHEEL_STEP,
        MouseEventKind::ScrollUp => *offset = offset.saturating_sub(WHEEL_STEP),
        _ => {}
    }
}

fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.size();
    if area.width < MIN_SIZE.0 || area.height < MIN_SIZE.1 {
        draw_too_small(frame, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1), Constraint::Min(3)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(VARIABLES_WIDTH)])
        .split(rows[2]);

    draw_input(frame, app, rows[0]);
    draw_key_hints(frame, rows[1]);
    draw_history(frame, app, columns[0]);
    draw_variables(frame, app, columns[1]);
    app.list_height = columns[0].height as usize;
}

fn draw_too_small(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            format!("Need at least {}x{}, have {}x{}", MIN_SIZE.0, MIN_SIZE.1, area.width, area.height),
            bold(Color::Red),
        )),
        Line::from(Span::styled("Enlarge the window to continue", fg(Color::Yellow))),
    ];
    let message = Paragraph::new(text)
        .block(panel(" Window Too Small ").border_style(fg(Color::Red)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(message, area);
}

/// The list rows for one history entry: headline, caret marker, then any steps.
fn entry_rows(entry: &HistoryEntry, selected: bool, wrap_width: usize) -> Vec<ListItem<'static>> {
    let expression_style = fg(if selected { Color::Yellow } else { Color::Cyan });

    let mut headline = vec![Span::styled("> ", fg(Color::Green))];
    headline.extend(highlight_expression(&entry.input, expression_style));
    headline.push(Span::styled(" = ", fg(Color::Gray)));
    headline.push(match &entry.result {
        Ok(value) => Span::styled(format_value(*value), bold(Color::LightMagenta)),
        Err(diagnostic) => Span::styled(format!("error: {}", diagnostic), bold(Color::Red)),
    });

    let mut rows = vec![ListItem::new(Line::from(headline))];

    if let Err(diagnostic) = &entry.result {
        rows.push(ListItem::new(Line::from(Span::styled(
            format!("  {}", diagnostic.echo_line()),
            fg(Color::Gray),
        ))));
        rows.push(ListItem::new(Line::from(Span::styled(
            format!("  {}^", " ".repeat(caret_padding(diagnostic))),
            fg(Color::Red),
        ))));
    }

    if entry.detailed_mode {
        let mut notes: Vec<(String, Color)> = entry
            .detailed_steps
            .iter()
            .enumerate()
            .map(|(n, step)| {
                let text = format!("{}. {} = {}", n + 1, step.operation, format_value(step.result));
                (text, Color::DarkGray)
            })
            .collect();
        let elapsed_ms = entry.duration.as_secs_f64() * 1000.0;
        notes.push((format!("took {:.6} ms", elapsed_ms), Color::Magenta));

        for (text, color) in notes {
            rows.extend(
                wrap_text(&text, wrap_width)
                    .into_iter()
                    .map(|piece| ListItem::new(Line::from(Span::styled(format!("{STEP_INDENT}{piece}"), fg(color))))),
            );
        }
    }

    rows
}

fn draw_history(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = panel(" History ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.history.is_empty() {
        let hint = Paragraph::new("Type a postfix expression such as 3 4 + and press Enter")
            .style(fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(hint, inner);
        return;
    }

    let wrap_width = (inner.width as usize).saturating_sub(STEP_INDENT.len());
    let separator = "─".repeat(inner.width as usize);
    let mut rows = Vec::new();
    app.item_start_indices.clear();

    for (index, entry) in app.history.iter().enumerate() {
        if index > 0 {
            rows.push(ListItem::new(Line::from(Span::styled(separator.clone(), fg(Color::DarkGray)))));
        }
        app.item_start_indices.push(rows.len());
        rows.extend(entry_rows(entry, index == app.cursor_history, wrap_width));
    }

    if app.scroll_to_bottom {
        app.history_scroll = rows.len().saturating_sub(inner.height as usize);
        app.scroll_to_bottom = false;
    }

    let list = List::new(rows).highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
    let mut state = ListState::default()
        .with_selected(app.item_start_indices.get(app.cursor_history).copied())
        .with_offset(app.history_scroll);
    frame.render_stateful_widget(list, inner, &mut state);
}

fn draw_variables(frame: &mut Frame, app: &App, area: Rect) {
    let symbols = app.evaluator.symbols();
    if symbols.is_empty() {
        let empty = Paragraph::new("(empty)")
            .style(fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(panel(" Variables "));
        frame.render_widget(empty, area);
        return;
    }

    let rows: Vec<ListItem> = symbols
        .iter()
        .map(|(name, value)| {
            ListItem::new(Line::from(vec![
                Span::styled(name.to_string(), bold(Color::LightBlue)),
                Span::styled(" = ", fg(Color::Gray)),
                Span::styled(format_value(value), fg(Color::LightMagenta)),
            ]))
        })
        .collect();
    frame.render_widget(List::new(rows).block(panel(" Variables ")), area);
}

fn draw_key_hints(frame: &mut Frame, area: Rect) {
    const HINTS: [(&str, &str); 5] = [
        ("Enter", "evaluate"),
        ("Up/Down", "recall"),
        ("PgUp/PgDn", "page"),
        ("F1", "help"),
        ("Ctrl+U", "clear line"),
    ];

    let spans: Vec<Span> = HINTS
        .iter()
        .flat_map(|&(key, action)| {
            [
                Span::styled(key, bold(Color::Yellow)),
                Span::styled(format!(" {action}  "), fg(Color::DarkGray)),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_input(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = panel(" Expression ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Two columns go to the "> " marker.
    let width = (inner.width as usize).saturating_sub(2);
    let input = &mut app.input;
    input.fit_scroll(width);

    let shown: String = input.text.chars().skip(input.scroll).take(width).collect();
    let before_cursor: String = shown.chars().take(input.cursor.saturating_sub(input.scroll)).collect();
    frame.render_widget(Paragraph::new(format!("> {shown}")), inner);
    frame.set_cursor(inner.x + 2 + before_cursor.width() as u16, inner.y);

    let marker = fg(Color::DarkGray);
    if input.scroll > 0 {
        frame.render_widget(Paragraph::new("<").style(marker), Rect::new(inner.x, inner.y, 1, 1));
    }
    if input.text.chars().count() > input.scroll + width {
        let right = Rect::new(inner.right().saturating_sub(1), inner.y, 1, 1);
        frame.render_widget(Paragraph::new(">").style(marker), right);
    }
}
