//! Barber pole widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::Widget,
};

use crate::pole::render::Framebuffer;

/// Draws a framebuffer with two pixels per cell using half blocks.
/// Uncovered pixels leave the cell untouched.
pub struct PoleWidget<'a> {
    frame: &'a Framebuffer,
}

impl<'a> PoleWidget<'a> {
    /// Widget drawing `frame`.
    pub const fn new(frame: &'a Framebuffer) -> Self {
        Self { frame }
    }
}

const fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

impl Widget for PoleWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let (x, y) = (usize::from(col), usize::from(row) * 2);
                let top = self.frame.get(x, y);
                let bottom = self.frame.get(x, y + 1);
                let cell = buf.get_mut(area.x + col, area.y + row);
                match (top, bottom) {
                    (None, None) => {}
                    (Some(top), Some(bottom)) => {
                        cell.set_symbol("▀").set_fg(rgb(top)).set_bg(rgb(bottom));
                    }
                    (Some(top), None) => {
                        cell.set_symbol("▀").set_fg(rgb(top)).set_bg(Color::Reset);
                    }
                    (None, Some(bottom)) => {
                        cell.set_symbol("▄").set_fg(rgb(bottom)).set_bg(Color::Reset);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::pole::BarberPole;

    #[test]
    fn pole_cells_use_half_blocks() {
        let mut pole = BarberPole::create(20, 40).unwrap();
        pole.update();

        let area = Rect::new(0, 0, 20, 20);
        let mut buf = Buffer::empty(area);
        PoleWidget::new(pole.frame()).render(area, &mut buf);

        let centre = buf.get(10, 10);
        assert_eq!(centre.symbol(), "▀");
        assert!(matches!(centre.fg, Color::Rgb(..)));
        assert_eq!(buf.get(0, 0).symbol(), " ");
    }
}
