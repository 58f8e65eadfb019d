//! Public page controller.
//!
//! Owns everything the public page shows: the hero barber pole, the
//! simulated loader, entrance and scroll-triggered reveals, the gallery
//! grid and the booking form.

pub mod content;
pub mod layout;

use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::Frame;
use std::time::Duration;

use crate::api::types::{Appointment, BookingResponse, GalleryItem};
use crate::config::Config;
use crate::constants::{booking, messages, motion, ui};
use crate::error::Result;
use crate::form::{Field, FieldKind, Form, SubmitButton};
use crate::input::{GlobalHandler, InputContext, InputHandler, InputResult};
use crate::motion::{Loader, Reveal, ScrollTrigger, Scroller, TriggerAction};
use crate::page::Page;
use crate::pole::BarberPole;
use crate::tasks::{AppUpdate, Command};
use layout::{PageLayout, Section};

/// Customer name field.
pub const FIELD_NAME: &str = "Name";
/// Email field.
pub const FIELD_EMAIL: &str = "Email";
/// Phone field.
pub const FIELD_PHONE: &str = "Phone";
/// Appointment date and time field.
pub const FIELD_DATETIME: &str = "Date & Time";
/// Service choice field.
pub const FIELD_SERVICE: &str = "Service";

/// Rows scrolled per mouse wheel notch.
const WHEEL_ROWS: f32 = 3.0;

/// Which part of the page receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Scrolling and navigation
    Page,
    /// Typing into the booking form
    Booking,
}

/// Hero entrance reveals.
#[derive(Debug, Clone)]
pub struct HeroReveals {
    /// Heading
    pub title: Reveal,
    /// Intro text
    pub text: Reveal,
    /// Call-to-action button
    pub cta: Reveal,
}

impl Default for HeroReveals {
    fn default() -> Self {
        Self {
            title: Reveal::new(100.0, 1.0, 0.0),
            text: Reveal::new(50.0, 1.0, 0.3),
            cta: Reveal::new(30.0, 1.0, 0.6),
        }
    }
}

/// A section whose content reveals when scrolled to.
#[derive(Debug, Clone)]
pub struct ScrollReveal {
    /// Section the trigger watches
    pub section: Section,
    /// Fires as the section crosses the viewport centre
    pub trigger: ScrollTrigger,
    /// One reveal per animated element
    pub items: Vec<Reveal>,
}

impl ScrollReveal {
    fn services() -> Self {
        let items = (0..content::SERVICE_CARDS.len())
            .map(|i| Reveal::new(100.0, 0.8, motion::SERVICE_STAGGER * i as f32))
            .collect();
        Self {
            section: Section::Services,
            trigger: ScrollTrigger::default(),
            items,
        }
    }

    fn single(section: Section) -> Self {
        Self {
            section,
            trigger: ScrollTrigger::default(),
            items: vec![Reveal::new(50.0, 1.0, 0.0)],
        }
    }
}

fn booking_form() -> Form {
    Form::new(vec![
        Field::new(FIELD_NAME, FieldKind::Text),
        Field::new(FIELD_EMAIL, FieldKind::Text),
        Field::new(FIELD_PHONE, FieldKind::Text),
        Field::new(FIELD_DATETIME, FieldKind::Text),
        Field::new(FIELD_SERVICE, FieldKind::Choice(booking::SERVICES)),
    ])
}

/// State and behaviour of the public page.
pub struct SiteController {
    pub(crate) pole: Option<BarberPole>,
    pub(crate) gallery: Option<Vec<GalleryItem>>,
    pub(crate) loader: Loader,
    rng: StdRng,
    pub(crate) hero: HeroReveals,
    pub(crate) scroll_reveals: Vec<ScrollReveal>,
    animations_started: bool,
    /// Set by `start`; the pole is only built from then on
    started: bool,
    pub(crate) scroller: Scroller,
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) layout: PageLayout,
    pub(crate) booking: Form,
    pub(crate) submit: SubmitButton,
    pub(crate) focus: Focus,
    pub(crate) alert: Option<String>,
    pub(crate) show_help: bool,
    should_quit: bool,
}

impl SiteController {
    /// Controller with an entropy-seeded loader.
    pub fn new(config: &Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Controller with a fixed random source for the loader.
    pub fn with_rng(config: &Config, rng: StdRng) -> Self {
        Self {
            pole: None,
            gallery: None,
            loader: Loader::new(config.loader_tick),
            rng,
            hero: HeroReveals::default(),
            scroll_reveals: vec![
                ScrollReveal::services(),
                ScrollReveal::single(Section::About),
                ScrollReveal::single(Section::Contact),
            ],
            animations_started: false,
            started: false,
            scroller: Scroller::default(),
            width: 0,
            height: 0,
            layout: PageLayout::compute(0, 0, 0),
            booking: booking_form(),
            submit: SubmitButton::new(booking::SUBMIT_LABEL, booking::BUSY_LABEL),
            focus: Focus::Page,
            alert: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// Build the barber pole for the current hero size. Failure is logged
    /// and the page carries on without it.
    fn init_pole(&mut self) {
        let (width, height) = self.layout.pole_pixels();
        match BarberPole::create(width, height) {
            Ok(pole) => self.pole = Some(pole),
            Err(e) => tracing::error!("Error initializing scene: {e}"),
        }
    }

    fn relayout(&mut self) {
        let items = self.gallery.as_ref().map_or(0, Vec::len);
        self.layout = PageLayout::compute(self.width, self.height, items);
        self.scroller.set_max(f32::from(self.layout.max_scroll()));
    }

    /// Validate the booking form and, if complete, disable the submit
    /// control and request the booking.
    pub fn submit_booking(&mut self) -> Vec<Command> {
        if self.submit.is_disabled() {
            return Vec::new();
        }
        if let Err(e) = self.booking.validate() {
            tracing::debug!("Booking not sent: {e}");
            self.alert = Some(messages::FILL_ALL_FIELDS.to_string());
            return Vec::new();
        }

        self.submit.begin();
        vec![Command::BookAppointment(self.appointment())]
    }

    fn appointment(&self) -> Appointment {
        let form = &self.booking;
        Appointment {
            name: form.value(FIELD_NAME).to_string(),
            email: form.value(FIELD_EMAIL).to_string(),
            phone: form.value(FIELD_PHONE).to_string(),
            datetime: form.value(FIELD_DATETIME).to_string(),
            service: form.value(FIELD_SERVICE).to_string(),
        }
    }

    fn booked(&mut self, result: Result<BookingResponse>) {
        self.submit.finish();
        match result {
            Ok(BookingResponse { message: Some(message) }) => self.alert = Some(message),
            Ok(BookingResponse { message: None }) => {
                tracing::warn!("Booking response carried no message");
                self.alert = Some(messages::BOOKING_FAILED.to_string());
            }
            Err(e) => {
                tracing::error!("Error booking appointment: {e}");
                self.alert = Some(messages::BOOKING_FAILED.to_string());
            }
        }
    }

    /// Glide the page to an in-page anchor such as `#services`.
    pub fn navigate(&mut self, anchor: &str) {
        match Section::from_anchor(anchor) {
            Some(section) => self.scroll_to(section),
            None => tracing::warn!("No section for link {anchor}"),
        }
    }

    fn scroll_to(&mut self, section: Section) {
        self.scroller.scroll_to(f32::from(self.layout.top(section)));
    }

    /// Follow the hero call-to-action and focus the booking form.
    fn open_booking(&mut self) {
        self.navigate(content::HERO_CTA_TARGET);
        self.focus = Focus::Booking;
    }

    /// Entrance animations, started once when the loader completes.
    fn start_animations(&mut self) {
        self.animations_started = true;
        self.hero.title.play();
        self.hero.text.play();
        self.hero.cta.play();
        for reveal in &mut self.scroll_reveals {
            reveal.items.iter_mut().for_each(Reveal::arm);
        }
        self.update_triggers();
    }

    fn update_triggers(&mut self) {
        let scroll = self.scroller.offset();
        let viewport = f32::from(self.layout.viewport_height);
        for reveal in &mut self.scroll_reveals {
            let top = f32::from(self.layout.top(reveal.section));
            match reveal.trigger.update(top, scroll, viewport) {
                Some(TriggerAction::Play) => reveal.items.iter_mut().for_each(Reveal::play),
                Some(TriggerAction::Reverse) => reveal.items.iter_mut().for_each(Reveal::reverse),
                None => {}
            }
        }
    }

    fn wheel(&mut self, row: u16, rows: f32) {
        let doc_row = f32::from(row.saturating_sub(layout::NAV_ROWS)) + self.scroller.offset();
        let hero = self.layout.span(Section::Hero);
        let over_hero = hero.is_some_and(|h| doc_row < f32::from(h.top + h.height));
        if over_hero {
            if let Some(pole) = &mut self.pole {
                let factor = if rows > 0.0 { 1.05 } else { 0.95 };
                if pole.dolly(factor) {
                    return;
                }
            }
        }
        self.scroller.scroll_by(rows);
    }

    fn handle_page_key(&mut self, key: KeyEvent) {
        let step = ui::PAGE_STEP;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroller.scroll_by(-1.0),
            KeyCode::Down | KeyCode::Char('j') => self.scroller.scroll_by(1.0),
            KeyCode::PageUp => self.scroller.scroll_by(-step),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroller.scroll_by(step),
            KeyCode::Home => self.scroller.scroll_to(0.0),
            KeyCode::End => self.scroller.scroll_to(f32::from(self.layout.max_scroll())),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c.to_digit(10).map_or(0, |d| d as usize - 1);
                self.scroll_to(Section::NAV[index]);
            }
            KeyCode::Enter | KeyCode::Tab | KeyCode::Char('b') => self.open_booking(),
            _ => {}
        }
    }

    fn handle_booking_key(&mut self, key: KeyEvent, ctx: &InputContext) -> Vec<Command> {
        if key.code == KeyCode::Esc {
            self.focus = Focus::Page;
            return Vec::new();
        }
        match self.booking.handle(key, ctx) {
            InputResult::Submit => self.submit_booking(),
            _ => Vec::new(),
        }
    }

    /// Message shown over the page, if any.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Close the alert.
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Booking form state.
    pub fn booking_form(&self) -> &Form {
        &self.booking
    }

    /// Booking form, for filling in.
    pub fn booking_form_mut(&mut self) -> &mut Form {
        &mut self.booking
    }

    /// Booking submit button.
    pub const fn submit_button(&self) -> &SubmitButton {
        &self.submit
    }

    /// Loaded gallery; `None` until loaded or after a failed load.
    pub fn gallery(&self) -> Option<&[GalleryItem]> {
        self.gallery.as_deref()
    }

    /// Loading overlay.
    pub const fn loader(&self) -> &Loader {
        &self.loader
    }

    /// Hero pole; `None` before `start` or when the window is too small.
    pub const fn pole(&self) -> Option<&BarberPole> {
        self.pole.as_ref()
    }

    /// Hero entrance reveals.
    pub const fn hero(&self) -> &HeroReveals {
        &self.hero
    }

    /// Scroll-triggered reveal state for `section`.
    pub fn scroll_reveal(&self, section: Section) -> Option<&ScrollReveal> {
        self.scroll_reveals.iter().find(|r| r.section == section)
    }

    /// Scroll position in document rows.
    pub const fn scroll_offset(&self) -> f32 {
        self.scroller.offset()
    }

    /// Current section layout.
    pub const fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Whether keys go to the page or the booking form.
    pub const fn focus(&self) -> Focus {
        self.focus
    }
}

impl Page for SiteController {
    fn start(&mut self) -> Vec<Command> {
        self.started = true;
        self.init_pole();
        vec![Command::LoadGallery]
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.relayout();
        let (w, h) = self.layout.pole_pixels();
        if let Some(pole) = &mut self.pole {
            if let Err(e) = pole.resize(w, h) {
                tracing::warn!("Barber pole not resized: {e}");
            }
        } else if self.started && w > 0 && h > 0 {
            // Started in a window too small for the pole: try again now
            self.init_pole();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        let ctx = InputContext {
            editing: self.focus == Focus::Booking,
            has_modal: self.alert.is_some(),
        };
        match GlobalHandler.handle(key, &ctx) {
            InputResult::Quit => {
                self.should_quit = true;
                return Vec::new();
            }
            InputResult::ToggleHelp => {
                self.show_help = !self.show_help;
                return Vec::new();
            }
            _ => {}
        }

        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.dismiss_alert();
            }
            return Vec::new();
        }
        if self.show_help {
            if key.code == KeyCode::Esc {
                self.show_help = false;
            }
            return Vec::new();
        }
        // The loader overlay covers the page until it is gone
        if self.loader.is_visible() {
            return Vec::new();
        }

        match self.focus {
            Focus::Page => {
                self.handle_page_key(key);
                Vec::new()
            }
            Focus::Booking => self.handle_booking_key(key, &ctx),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Vec<Command> {
        if self.alert.is_some() || self.show_help || self.loader.is_visible() {
            return Vec::new();
        }
        match mouse.kind {
            MouseEventKind::ScrollDown => self.wheel(mouse.row, WHEEL_ROWS),
            MouseEventKind::ScrollUp => self.wheel(mouse.row, -WHEEL_ROWS),
            MouseEventKind::Down(_) if mouse.row < layout::NAV_ROWS => {
                if let Some(section) = layout::nav_hit(self.width, mouse.column) {
                    self.navigate(section.anchor());
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_paste(&mut self, text: &str) {
        if self.focus == Focus::Booking && self.alert.is_none() {
            self.booking.paste(text);
        }
    }

    fn apply(&mut self, update: AppUpdate) -> Vec<Command> {
        match update {
            AppUpdate::GalleryLoaded(Ok(items)) => {
                tracing::debug!("Loaded {} gallery items", items.len());
                self.gallery = Some(items);
                self.relayout();
            }
            AppUpdate::GalleryLoaded(Err(e)) => {
                tracing::error!("Error loading gallery items: {e}");
            }
            AppUpdate::Booked(result) => self.booked(result),
            other => tracing::debug!("Public page ignoring {:?}", other),
        }
        Vec::new()
    }

    fn tick(&mut self, dt: Duration) {
        if self.loader.advance(dt, &mut self.rng) {
            self.start_animations();
        }
        if let Some(pole) = &mut self.pole {
            pole.update();
        }
        self.scroller.advance(dt);
        if self.animations_started {
            self.update_triggers();
        }

        for reveal in [&mut self.hero.title, &mut self.hero.text, &mut self.hero.cta] {
            reveal.advance(dt);
        }
        for reveal in &mut self.scroll_reveals {
            reveal.items.iter_mut().for_each(|r| r.advance(dt));
        }
    }

    fn draw(&mut self, f: &mut Frame) {
        crate::ui::site::draw(f, self);
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }
}
