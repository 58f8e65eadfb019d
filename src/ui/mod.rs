//! User interface components.
//!
//! Provides TUI widgets and drawing functions shared by both pages using
//! ratatui.

pub mod admin;
mod pole;
pub mod site;

pub use pole::PoleWidget;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

use crate::form::{FieldKind, Form, SubmitButton};

/// Shop gold (#d4af37).
pub const GOLD: Color = Color::Rgb(0xd4, 0xaf, 0x37);

/// Draw the bordered command bar with key hints.
pub fn draw_command_bar(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled("Commands", Style::default().fg(Color::Yellow)));

    let status_bar = Paragraph::new(Line::from(create_help_text(hints)))
        .style(Style::default().fg(Color::Gray))
        .block(block);

    f.render_widget(status_bar, area);
}

/// Build styled help text spans from key-description pairs for the command bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")]; // Start with padding

    for (i, (key, description)) in commands.iter().enumerate() {
        text.push(Span::styled(
            *key,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        text.push(Span::raw(format!(": {description}")));

        if i < commands.len() - 1 {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Create a bordered block with a title, highlighted when focused.
pub fn create_titled_block(title: &str, is_focused: bool) -> Block<'_> {
    let (title_style, border_style) = if is_focused {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (Style::default(), Style::default())
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Centre a `width` x `height` box inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render a form: one bordered input per field, then the submit control.
///
/// `active` is whether the form holds keyboard focus. Returns where the
/// text cursor belongs, if a text field is focused.
#[allow(clippy::cast_possible_truncation)]
pub fn render_form(
    buf: &mut Buffer,
    area: Rect,
    form: &Form,
    active: bool,
    button: Option<&SubmitButton>,
) -> Option<(u16, u16)> {
    use unicode_width::UnicodeWidthStr;

    let mut constraints: Vec<Constraint> =
        form.fields().iter().map(|_| Constraint::Length(3)).collect();
    if button.is_some() {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut cursor = None;
    for (i, field) in form.fields().iter().enumerate() {
        let focused = active && form.focus() == i;
        let text = field.display();
        let style = if field.value().is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        if focused && !matches!(field.kind, FieldKind::Choice(_)) {
            let before: String = text.chars().take(field.cursor()).collect();
            let x = rows[i].x + 1 + before.width() as u16;
            if x < rows[i].right().saturating_sub(1) {
                cursor = Some((x, rows[i].y + 1));
            }
        }

        Paragraph::new(text)
            .style(style)
            .block(create_titled_block(field.label, focused))
            .render(rows[i], buf);
    }

    if let Some(button) = button {
        let style = if button.is_disabled() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Black).bg(GOLD).add_modifier(Modifier::BOLD)
        };
        let rect = rows[form.fields().len()];
        let width = (button.label().width() as u16 + 4).min(rect.width);
        Paragraph::new(button.label())
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::ALL).border_style(style))
            .render(Rect { width, ..rect }, buf);
    }

    cursor
}

/// Draw the blocking alert modal.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_status_message(f: &mut Frame, message: &str) {
    use unicode_width::UnicodeWidthStr;
    let size = f.size();

    // Calculate box width (max 80% of screen, min 50)
    let max_width = (size.width as usize * 80) / 100;
    let width = message.width().saturating_add(6).min(max_width).max(50) as u16;

    // Calculate how many lines the message will need when wrapped
    let inner_width = width.saturating_sub(4).max(1) as usize;
    let msg_lines = message.width().div_ceil(inner_width).max(1);
    let height = (msg_lines as u16 + 4).min(size.height.saturating_sub(4));

    let area = centered(size, width, height);

    let block = Block::default()
        .title(Span::styled("Info", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    f.render_widget(text, inner_area[0]);

    let hint = Paragraph::new("Press Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(hint, inner_area[1]);
}

/// Draw a yes/no confirmation modal.
pub fn draw_confirmation(f: &mut Frame, message: &str) {
    let size = f.size();
    let width = 50.min(size.width.saturating_sub(4));
    let area = centered(size, width, 6);

    let block = Block::default()
        .title(Span::styled("Confirm", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    f.render_widget(text, inner_area[0]);
    f.render_widget(
        Paragraph::new(Line::from(create_help_text(&[("y", "Yes"), ("n/Esc", "No")])))
            .alignment(Alignment::Center),
        inner_area[1],
    );
}

/// Draw the help modal. Entries with an empty description are headers.
pub fn draw_help_modal(f: &mut Frame, entries: &[(&str, &str)]) {
    let size = f.size();
    let width = 60.min(size.width.saturating_sub(4));
    let height = 24.min(size.height.saturating_sub(4));
    let area = centered(size, width, height);

    let block = Block::default()
        .title(Span::styled(
            " Help - Keybindings ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    let mut help_text: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            if desc.is_empty() {
                Line::from(Span::styled(
                    *key,
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{key:>12}"),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(*desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();
    help_text.push(Line::default());
    help_text.push(Line::from(Span::styled(
        "Press Esc, F1 or ? to close",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )));

    f.render_widget(Paragraph::new(help_text).wrap(Wrap { trim: true }), inner_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_text_separates_pairs() {
        let spans = create_help_text(&[("q", "Quit"), ("?", "Help")]);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " q: Quit | ?: Help");
    }

    #[test]
    fn centered_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered(area, 50, 50), area);
    }
}
