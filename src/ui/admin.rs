//! Admin page drawing: login screen and the three-pane panel.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use super::{
    centered, create_titled_block, draw_command_bar, draw_confirmation, draw_help_modal,
    draw_status_message, render_form, GOLD,
};
use crate::admin::{AdminController, AdminView, PanelFocus};
use crate::constants::messages;
use crate::view;

const HELP: &[(&str, &str)] = &[
    ("── Login ──", ""),
    ("Tab / ↑↓", "Next / previous field"),
    ("Enter", "Log in"),
    ("── Panel ──", ""),
    ("Tab", "Next pane"),
    ("↑/↓ or j/k", "Move in list"),
    ("d / Del", "Delete selected image"),
    ("u", "Upload an image"),
    ("r", "Reload lists"),
    ("Esc", "Leave upload form"),
    ("── Global ──", ""),
    ("F1 / ?", "Show this help"),
    ("q / Ctrl+C", "Quit"),
];

/// Render the admin page.
pub fn draw(f: &mut Frame, admin: &AdminController) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(3), // Command/status bar at bottom
        ])
        .split(f.size());

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled("Admin", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
        ]))
        .style(Style::default().bg(Color::Black)),
        chunks[0],
    );

    let cursor = match admin.view() {
        AdminView::Login => draw_login(f, admin, chunks[1]),
        AdminView::Panel => draw_panel(f, admin, chunks[1]),
    };

    let hints: &[(&str, &str)] = match (admin.view(), admin.focus()) {
        (AdminView::Login, _) => &[("Tab", "Next field"), ("Enter", "Log in"), ("Ctrl+C", "Quit")],
        (AdminView::Panel, PanelFocus::Upload) => &[
            ("Tab", "Next field"),
            ("Enter", "Upload"),
            ("Esc", "Back"),
        ],
        (AdminView::Panel, PanelFocus::Gallery) => &[
            ("Tab", "Next pane"),
            ("↑/↓", "Select"),
            ("d", "Delete"),
            ("u", "Upload"),
            ("r", "Reload"),
            ("q", "Quit"),
        ],
        (AdminView::Panel, PanelFocus::Appointments) => &[
            ("Tab", "Next pane"),
            ("↑/↓", "Scroll"),
            ("r", "Reload"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
    };
    draw_command_bar(f, chunks[2], hints);

    if let Some(alert) = admin.alert() {
        draw_status_message(f, alert);
        return;
    }
    if admin.pending_delete().is_some() {
        draw_confirmation(f, messages::CONFIRM_DELETE);
        return;
    }
    if admin.show_help {
        draw_help_modal(f, HELP);
        return;
    }
    if let Some((x, y)) = cursor {
        f.set_cursor(x, y);
    }
}

fn draw_login(f: &mut Frame, admin: &AdminController, area: Rect) -> Option<(u16, u16)> {
    let rect = centered(area, 50, 2 * 3 + 2);
    let block = create_titled_block("Admin Login", true);
    let inner = block.inner(rect);
    f.render_widget(block, rect);
    render_form(f.buffer_mut(), inner, &admin.login, true, None)
}

fn draw_panel(f: &mut Frame, admin: &AdminController, area: Rect) -> Option<(u16, u16)> {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(2 * 3 + 2)])
        .split(columns[1]);

    draw_appointments(f, admin, columns[0]);
    draw_gallery(f, admin, right[0]);

    let focused = admin.focus() == PanelFocus::Upload;
    let block = create_titled_block("Upload Image", focused);
    let inner = block.inner(right[1]);
    f.render_widget(block, right[1]);
    render_form(f.buffer_mut(), inner, &admin.upload, focused, None)
}

fn draw_appointments(f: &mut Frame, admin: &AdminController, area: Rect) {
    let focused = admin.focus() == PanelFocus::Appointments;
    let title = format!("Appointments ({})", admin.appointments().len());

    let items: Vec<ListItem> = admin
        .appointment_cards()
        .into_iter()
        .map(|card| {
            let mut lines = vec![Line::from(Span::styled(
                card.name,
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ))];
            lines.extend(card.details.into_iter().map(|d| Line::from(Span::raw(d))));
            lines.push(Line::default());
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items).block(create_titled_block(&title, focused));
    let mut state = ListState::default().with_offset(admin.appointment_scroll);
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_gallery(f: &mut Frame, admin: &AdminController, area: Rect) {
    let focused = admin.focus() == PanelFocus::Gallery;
    let title = format!("Gallery ({})", admin.gallery().len());

    let items: Vec<ListItem> = view::gallery_tiles(admin.gallery())
        .into_iter()
        .map(|tile| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled("× ", Style::default().fg(Color::Red)),
                    Span::styled(tile.caption, Style::default().fg(Color::White)),
                ]),
                Line::from(Span::styled(
                    format!("  {}", tile.image_url),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(create_titled_block(&title, focused))
        .highlight_style(Style::default().bg(Color::Rgb(80, 80, 120)).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !admin.gallery().is_empty() {
        state.select(Some(admin.gallery_selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}
