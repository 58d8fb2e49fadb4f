use crate::tui_mode::app::App;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
    ))
}

pub fn render_help(frame: &mut Frame, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" pdacalc Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let quit_line = format!("  {} : Quit the calculator (also Ctrl+C)", app.exit_word);

    let help_text = vec![
        Line::from(Span::styled(
            "pdacalc - Postfix Desk Calculator",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Postfix Notation:"),
        Line::from("  Operands come first, then the operator."),
        Line::from("  3 4 +        = 7"),
        Line::from("  10 4 -       = 6   (left operand first)"),
        Line::from("  2 3 4 * +    = 14"),
        Line::from(""),
        heading("Operators:"),
        Line::from("  + : Addition"),
        Line::from("  - : Subtraction"),
        Line::from("  * : Multiplication"),
        Line::from("  / : Division"),
        Line::from("  ~ : Negate the value on top of the stack (4 ~ = -4)"),
        Line::from(""),
        heading("Variables:"),
        Line::from("  x = 5        : Assign the rest of the line to x"),
        Line::from("  x 1 +        : Read x (unknown names read as 0)"),
        Line::from("  it           : Holds the last value not assigned elsewhere"),
        Line::from("  Names start with a letter and may contain digits."),
        Line::from(""),
        heading("Errors:"),
        Line::from("  A rejected line shows the reason and a ^ under the spot"),
        Line::from("  where reading stopped. Variables are left unchanged."),
        Line::from(""),
        heading("Commands:"),
        Line::from("  details <expression> : Show each step and the evaluation time"),
        Line::from("  clear : Clear history (variables are kept)"),
        Line::from("  help : Show this help screen"),
        Line::from(quit_line),
        Line::from("  Ctrl+U : Clear current input"),
        Line::from("  `clear` and `help` are commands here, so variables with"),
        Line::from("  those names can be assigned but not read back in this screen."),
        Line::from(""),
        heading("Navigation:"),
        Line::from("  ← → : Move cursor left/right"),
        Line::from("  Ctrl+←/→ : Move cursor by words"),
        Line::from("  Home/End : Move to start/end of line"),
        Line::from("  ↑ ↓ : Navigate history"),
        Line::from("  PgUp/PgDn : Page through history"),
        Line::from("  Mouse wheel : Scroll"),
        Line::from("  Esc : Close this screen"),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
