//! Vertical layout of the public page.
//!
//! The page is one tall document scrolled inside the terminal. Section
//! positions are in document rows and depend only on the terminal size
//! and how many gallery items are loaded.

use unicode_width::UnicodeWidthStr;

use super::content;
use crate::constants::ui;

/// Sections of the public page, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Full-height header with the barber pole
    Hero,
    /// Service cards
    Services,
    /// Gallery grid
    Gallery,
    /// About text
    About,
    /// Booking form
    Book,
    /// Address and hours
    Contact,
}

impl Section {
    /// Sections reachable from the navigation bar.
    pub const NAV: [Self; 5] = [
        Self::Services,
        Self::Gallery,
        Self::About,
        Self::Book,
        Self::Contact,
    ];

    /// In-page link target, e.g. `#book`.
    pub const fn anchor(self) -> &'static str {
        match self {
            Self::Hero => "#hero",
            Self::Services => "#services",
            Self::Gallery => "#gallery",
            Self::About => "#about",
            Self::Book => "#book",
            Self::Contact => "#contact",
        }
    }

    /// Heading and navigation label.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Hero => "Home",
            Self::Services => "Services",
            Self::Gallery => "Gallery",
            Self::About => "About",
            Self::Book => "Book",
            Self::Contact => "Contact",
        }
    }

    /// Resolve an in-page link such as `#book`.
    pub fn from_anchor(anchor: &str) -> Option<Self> {
        [Self::Hero]
            .into_iter()
            .chain(Self::NAV)
            .find(|s| s.anchor() == anchor)
    }
}

/// Where one section sits in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    /// Which section
    pub section: Section,
    /// First document row
    pub top: u16,
    /// Rows taken
    pub height: u16,
}

/// Rows above the scrolled document (navigation bar).
pub const NAV_ROWS: u16 = 1;
/// Rows below the scrolled document (command bar).
pub const COMMAND_ROWS: u16 = 3;
/// Minimum hero height in rows.
pub const MIN_HERO_ROWS: u16 = 12;
/// Height of a service card.
pub const SERVICE_CARD_ROWS: u16 = 9;
/// Height of one booking field including its border.
pub const FIELD_ROWS: u16 = 3;

/// Positions of every section for one terminal size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    /// Terminal width
    pub width: u16,
    /// Rows of the document visible at once
    pub viewport_height: u16,
    /// Sections in document order
    pub sections: Vec<SectionSpan>,
    /// Rows of the whole document
    pub total_height: u16,
}

impl PageLayout {
    /// Lay out the page for a `width` x `height` terminal.
    pub fn compute(width: u16, height: u16, gallery_items: usize) -> Self {
        let viewport_height = height.saturating_sub(NAV_ROWS + COMMAND_ROWS);
        let gallery_rows = u16::try_from(gallery_items.div_ceil(ui::GALLERY_COLUMNS))
            .unwrap_or(u16::MAX)
            .max(1);

        let heights = [
            (Section::Hero, viewport_height.max(MIN_HERO_ROWS)),
            (Section::Services, 3 + SERVICE_CARD_ROWS),
            (
                Section::Gallery,
                3u16.saturating_add(gallery_rows.saturating_mul(ui::GALLERY_TILE_ROWS)),
            ),
            (Section::About, 4 + line_count(content::ABOUT)),
            (Section::Book, 3 + FIELD_ROWS * 6),
            (Section::Contact, 4 + line_count(content::CONTACT)),
        ];

        let mut sections = Vec::with_capacity(heights.len());
        let mut top = 0u16;
        for (section, height) in heights {
            sections.push(SectionSpan { section, top, height });
            top = top.saturating_add(height);
        }

        Self {
            width,
            viewport_height,
            sections,
            total_height: top,
        }
    }

    /// Span of `section`, if laid out.
    pub fn span(&self, section: Section) -> Option<SectionSpan> {
        self.sections.iter().copied().find(|s| s.section == section)
    }

    /// Document row a section starts at.
    pub fn top(&self, section: Section) -> u16 {
        self.span(section).map_or(0, |s| s.top)
    }

    /// Largest scroll offset that still fills the viewport.
    pub const fn max_scroll(&self) -> u16 {
        self.total_height.saturating_sub(self.viewport_height)
    }

    /// Pixel size of the barber pole viewport inside the hero. Each cell
    /// holds two vertical pixels.
    pub fn pole_pixels(&self) -> (usize, usize) {
        let (cols, rows) = self.pole_cells();
        (usize::from(cols), usize::from(rows) * 2)
    }

    /// Cell size of the barber pole area: the right two fifths of the hero.
    pub fn pole_cells(&self) -> (u16, u16) {
        let hero = self.span(Section::Hero).map_or(0, |s| s.height);
        (self.width * 2 / 5, hero.saturating_sub(2))
    }
}

fn line_count(text: &[&str]) -> u16 {
    u16::try_from(text.len()).unwrap_or(u16::MAX)
}

/// Horizontal extent of each navigation link in the nav bar, after the
/// shop name.
pub fn nav_links(width: u16) -> Vec<(Section, u16, u16)> {
    let mut x = u16::try_from(content::SHOP_NAME.width()).unwrap_or(u16::MAX) + 4;
    let mut links = Vec::with_capacity(Section::NAV.len());
    for section in Section::NAV {
        let len = u16::try_from(section.title().width()).unwrap_or(u16::MAX);
        if x.saturating_add(len) > width {
            break;
        }
        links.push((section, x, x + len));
        x += len + 3;
    }
    links
}

/// Navigation link under `column`, if any.
pub fn nav_hit(width: u16, column: u16) -> Option<Section> {
    nav_links(width)
        .into_iter()
        .find(|(_, start, end)| (*start..*end).contains(&column))
        .map(|(section, _, _)| section)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_contiguous_in_order() {
        let layout = PageLayout::compute(100, 40, 4);
        let mut expected_top = 0;
        for span in &layout.sections {
            assert_eq!(span.top, expected_top);
            expected_top += span.height;
        }
        assert_eq!(layout.total_height, expected_top);
        assert_eq!(layout.sections[0].section, Section::Hero);
        assert_eq!(layout.sections[5].section, Section::Contact);
    }

    #[test]
    fn hero_fills_the_viewport() {
        let layout = PageLayout::compute(100, 40, 0);
        assert_eq!(layout.viewport_height, 36);
        assert_eq!(layout.top(Section::Services), 36);

        let tiny = PageLayout::compute(100, 6, 0);
        assert_eq!(tiny.top(Section::Services), MIN_HERO_ROWS);
    }

    #[test]
    fn gallery_grows_by_rows_of_three() {
        let empty = PageLayout::compute(100, 40, 0);
        let three = PageLayout::compute(100, 40, 3);
        let four = PageLayout::compute(100, 40, 4);
        assert_eq!(empty.total_height, three.total_height);
        assert_eq!(four.total_height, three.total_height + ui::GALLERY_TILE_ROWS);
    }

    #[test]
    fn pole_uses_half_block_pixels() {
        let layout = PageLayout::compute(100, 40, 0);
        assert_eq!(layout.pole_cells(), (40, 34));
        assert_eq!(layout.pole_pixels(), (40, 68));
        assert_eq!(PageLayout::compute(0, 0, 0).pole_pixels().0, 0);
    }

    #[test]
    fn anchors_resolve() {
        assert_eq!(Section::from_anchor("#book"), Some(Section::Book));
        assert_eq!(Section::from_anchor("#nowhere"), None);
    }

    #[test]
    fn nav_links_hit_test() {
        let links = nav_links(120);
        assert_eq!(links.len(), 5);
        let (section, start, _) = links[3];
        assert_eq!(section, Section::Book);
        assert_eq!(nav_hit(120, start), Some(Section::Book));
        assert_eq!(nav_hit(120, 0), None);
        assert!(nav_links(10).is_empty());
    }
}
