//! Public page drawing.
//!
//! Each visible section renders into its own buffer, which is then copied
//! into the frame at its scrolled position.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Widget, Wrap},
    Frame,
};

use super::{
    create_titled_block, draw_command_bar, draw_help_modal, draw_status_message, render_form,
    PoleWidget, GOLD,
};
use crate::constants::ui;
use crate::motion::Reveal;
use crate::site::content;
use crate::site::layout::{self, Section, SectionSpan};
use crate::site::{Focus, SiteController};
use crate::view;

const HELP: &[(&str, &str)] = &[
    ("── Page ──", ""),
    ("↑/↓ or j/k", "Scroll"),
    ("PgUp/PgDn", "Scroll a page"),
    ("Home/End", "Top / bottom"),
    ("1-5", "Jump to section"),
    ("Enter / b", "Book an appointment"),
    ("── Booking ──", ""),
    ("Tab / ↑↓", "Next / previous field"),
    ("←/→ Space", "Choose service"),
    ("Enter", "Book appointment"),
    ("Esc", "Back to page"),
    ("── Global ──", ""),
    ("F1 / ?", "Show this help"),
    ("q / Ctrl+C", "Quit"),
];

/// Render the public page.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn draw(f: &mut Frame, site: &SiteController) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(layout::NAV_ROWS),
            Constraint::Min(1),
            Constraint::Length(layout::COMMAND_ROWS),
        ])
        .split(f.size());

    let scroll = site.scroll_offset().round().max(0.0) as u16;
    draw_nav(f, chunks[0], site, scroll);

    let doc = chunks[1];
    let mut cursor = None;
    for span in &site.layout().sections {
        let bottom = span.top.saturating_add(span.height);
        if bottom <= scroll || span.top >= scroll.saturating_add(doc.height) {
            continue;
        }
        let area = Rect::new(0, 0, doc.width, span.height);
        let mut buf = Buffer::empty(area);
        let section_cursor = render_section(&mut buf, *span, site);
        blit(&buf, f.buffer_mut(), doc, span.top, scroll);

        if let Some((x, y)) = section_cursor {
            let doc_row = span.top + y;
            if doc_row >= scroll && doc_row < scroll + doc.height {
                cursor = Some((doc.x + x, doc.y + doc_row - scroll));
            }
        }
    }

    let hints: &[(&str, &str)] = if site.loader().is_visible() {
        &[("q", "Quit")]
    } else {
        match site.focus() {
            Focus::Page => &[
                ("↑/↓", "Scroll"),
                ("1-5", "Jump"),
                ("b", "Book"),
                ("?", "Help"),
                ("q", "Quit"),
            ],
            Focus::Booking => &[
                ("Tab", "Next field"),
                ("←/→", "Service"),
                ("Enter", "Book"),
                ("Esc", "Back"),
            ],
        }
    };
    draw_command_bar(f, chunks[2], hints);

    if site.loader().is_visible() {
        draw_loader(f, site);
        return;
    }
    if let Some(alert) = site.alert() {
        draw_status_message(f, alert);
        return;
    }
    if site.show_help {
        draw_help_modal(f, HELP);
        return;
    }
    if let Some((x, y)) = cursor {
        f.set_cursor(x, y);
    }
}

/// Copy the rows of a section buffer that fall inside the viewport.
fn blit(src: &Buffer, dst: &mut Buffer, viewport: Rect, top: u16, scroll: u16) {
    let area = src.area;
    for row in 0..area.height {
        let doc_row = top + row;
        if doc_row < scroll || doc_row >= scroll + viewport.height {
            continue;
        }
        let y = viewport.y + doc_row - scroll;
        for col in 0..area.width.min(viewport.width) {
            *dst.get_mut(viewport.x + col, y) = src.get(col, row).clone();
        }
    }
}

fn draw_nav(f: &mut Frame, area: Rect, site: &SiteController, scroll: u16) {
    let current = site
        .layout()
        .sections
        .iter()
        .rev()
        .find(|s| s.top <= scroll.saturating_add(1))
        .map(|s| s.section);

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(content::SHOP_NAME, Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
    ];
    let mut x = 1 + u16::try_from(unicode_width::UnicodeWidthStr::width(content::SHOP_NAME)).unwrap_or(0);
    for (section, start, _) in layout::nav_links(area.width) {
        spans.push(Span::raw(" ".repeat(usize::from(start.saturating_sub(x)))));
        let style = if Some(section) == current {
            Style::default().fg(GOLD).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(section.title(), style));
        x = start + u16::try_from(section.title().len()).unwrap_or(0);
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black)),
        area,
    );
}

/// Style for a revealing element, or `None` while it is invisible.
fn reveal_style(style: Style, reveal: &Reveal) -> Option<Style> {
    let opacity = reveal.opacity();
    if opacity < 0.1 {
        None
    } else if opacity < 0.6 {
        Some(style.add_modifier(Modifier::DIM))
    } else {
        Some(style)
    }
}

/// `area` pushed down by the reveal's current offset, clipped to `bounds`.
fn shifted(area: Rect, reveal: &Reveal, bounds: Rect) -> Rect {
    let y = area.y.saturating_add(reveal.rows_down());
    Rect { y, ..area }.intersection(bounds)
}

fn heading(buf: &mut Buffer, area: Rect, title: &str) {
    Paragraph::new(Line::from(Span::styled(
        title,
        Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .render(Rect { height: 1, ..area }, buf);
}

/// Area below the heading row and a blank line.
fn body(area: Rect) -> Rect {
    Rect {
        y: area.y + 2,
        height: area.height.saturating_sub(2),
        ..area
    }
}

fn render_section(buf: &mut Buffer, span: SectionSpan, site: &SiteController) -> Option<(u16, u16)> {
    let area = buf.area;
    match span.section {
        Section::Hero => render_hero(buf, area, site),
        Section::Services => render_services(buf, area, site),
        Section::Gallery => render_gallery(buf, area, site),
        Section::About => render_revealed_text(buf, area, site, Section::About, content::ABOUT),
        Section::Book => return render_booking(buf, area, site),
        Section::Contact => render_revealed_text(buf, area, site, Section::Contact, content::CONTACT),
    }
    None
}

fn render_hero(buf: &mut Buffer, area: Rect, site: &SiteController) {
    let (pole_cols, pole_rows) = site.layout().pole_cells();
    let text_area = Rect {
        width: area.width.saturating_sub(pole_cols),
        ..area
    };
    let centre = text_area.y + text_area.height / 2;
    let hero = site.hero();

    let lines: [(&Reveal, Rect, Style, &str, bool); 3] = [
        (
            &hero.title,
            Rect::new(text_area.x + 2, centre.saturating_sub(3), text_area.width.saturating_sub(4), 1),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            content::HERO_TITLE,
            false,
        ),
        (
            &hero.text,
            Rect::new(text_area.x + 2, centre.saturating_sub(1), text_area.width.saturating_sub(4), 2),
            Style::default().fg(Color::White),
            content::HERO_TEXT,
            false,
        ),
        (
            &hero.cta,
            Rect::new(text_area.x + 2, centre + 2, 14, 3),
            Style::default().fg(Color::Black).bg(GOLD).add_modifier(Modifier::BOLD),
            content::HERO_CTA,
            true,
        ),
    ];
    for (reveal, rect, style, text, button) in lines {
        let Some(style) = reveal_style(style, reveal) else {
            continue;
        };
        let rect = shifted(rect, reveal, area);
        if button {
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::default().borders(Borders::ALL).border_style(style))
                .render(rect, buf);
        } else {
            Paragraph::new(text).style(style).wrap(Wrap { trim: true }).render(rect, buf);
        }
    }

    if let Some(pole) = site.pole() {
        let pole_area = Rect::new(area.right().saturating_sub(pole_cols), area.y + 1, pole_cols, pole_rows)
            .intersection(area);
        PoleWidget::new(pole.frame()).render(pole_area, buf);
    }
}

fn render_services(buf: &mut Buffer, area: Rect, site: &SiteController) {
    heading(buf, area, Section::Services.title());
    let Some(reveal) = site.scroll_reveal(Section::Services) else {
        return;
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .horizontal_margin(1)
        .split(Rect {
            height: layout::SERVICE_CARD_ROWS,
            ..body(area)
        });

    for ((card, column), item) in content::SERVICE_CARDS.iter().zip(columns.iter()).zip(&reveal.items) {
        let Some(style) = reveal_style(Style::default().fg(Color::White), item) else {
            continue;
        };
        let text = vec![
            Line::from(Span::styled(card.price, style.fg(GOLD))),
            Line::default(),
            Line::from(Span::styled(card.description, style)),
        ];
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(create_titled_block(card.title, false).border_style(style))
            .render(shifted(*column, item, area), buf);
    }
}

fn render_gallery(buf: &mut Buffer, area: Rect, site: &SiteController) {
    heading(buf, area, Section::Gallery.title());
    // No grid at all until the gallery has loaded
    let Some(items) = site.gallery() else {
        return;
    };
    let grid = body(area);
    let tiles = view::gallery_tiles(items);
    let columns = u16::try_from(ui::GALLERY_COLUMNS).unwrap_or(1);
    let tile_width = grid.width.saturating_sub(2) / columns;

    for (i, tile) in tiles.iter().enumerate() {
        let (row, col) = (i / ui::GALLERY_COLUMNS, i % ui::GALLERY_COLUMNS);
        let Ok(row) = u16::try_from(row) else {
            break;
        };
        let col = u16::try_from(col).unwrap_or(0);
        let rect = Rect::new(
            grid.x + 1 + col * tile_width,
            grid.y + row * ui::GALLERY_TILE_ROWS,
            tile_width,
            ui::GALLERY_TILE_ROWS,
        )
        .intersection(area);
        let text = vec![
            Line::from(Span::styled(tile.caption.as_str(), Style::default().fg(Color::White))),
            Line::from(Span::styled(tile.image_url.as_str(), Style::default().fg(Color::DarkGray))),
        ];
        Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(GOLD)))
            .render(rect, buf);
    }
}

fn render_revealed_text(
    buf: &mut Buffer,
    area: Rect,
    site: &SiteController,
    section: Section,
    text: &[&str],
) {
    heading(buf, area, section.title());
    let Some(reveal) = site.scroll_reveal(section).and_then(|r| r.items.first()) else {
        return;
    };
    let Some(style) = reveal_style(Style::default().fg(Color::White), reveal) else {
        return;
    };
    let inner = body(area);
    let width = inner.width.min(80);
    let rect = Rect {
        x: inner.x + (inner.width - width) / 2,
        width,
        ..inner
    };
    let mut lines: Vec<Line> = text.iter().map(|l| Line::from(Span::styled(*l, style))).collect();
    if section == Section::Contact {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(content::FOOTER, style.fg(Color::DarkGray))));
    }
    Paragraph::new(lines).render(shifted(rect, reveal, area), buf);
}

fn render_booking(buf: &mut Buffer, area: Rect, site: &SiteController) -> Option<(u16, u16)> {
    heading(buf, area, "Book an Appointment");
    let inner = body(area);
    let width = inner.width.min(60);
    let rect = Rect {
        x: inner.x + (inner.width - width) / 2,
        width,
        ..inner
    };
    render_form(
        buf,
        rect,
        site.booking_form(),
        site.focus() == Focus::Booking,
        Some(site.submit_button()),
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn draw_loader(f: &mut Frame, site: &SiteController) {
    let size = f.size();
    let loader = site.loader();
    let mut style = Style::default().fg(GOLD).bg(Color::Black);
    if loader.opacity() < 0.5 {
        style = style.add_modifier(Modifier::DIM);
    }

    f.render_widget(Clear, size);
    f.render_widget(Block::default().style(Style::default().bg(Color::Black)), size);

    let area = super::centered(size, 40.min(size.width), 3);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).border_style(style).title(content::SHOP_NAME))
        .gauge_style(style)
        .percent(loader.progress().clamp(0.0, 100.0) as u16);
    f.render_widget(gauge, area);
}
