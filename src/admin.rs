//! Admin page controller.
//!
//! Access is gated on a locally stored token: with one the panel is shown
//! straight away, without one the login form is. The token is never
//! validated here; the server decides what it accepts.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use std::path::PathBuf;

use crate::api::types::{
    Appointment, Credentials, GalleryItem, GalleryItemId, GalleryUpload, LoginResponse,
    UploadResponse,
};
use crate::config::Config;
use crate::constants::messages;
use crate::error::Result;
use crate::form::{Field, FieldKind, Form};
use crate::input::{GlobalHandler, InputContext, InputHandler, InputResult};
use crate::page::Page;
use crate::session::KeyValueStore;
use crate::tasks::{AppUpdate, Command};
use crate::view::{self, AppointmentCard};

/// Login user name field.
pub const FIELD_USERNAME: &str = "Username";
/// Login password field, masked.
pub const FIELD_PASSWORD: &str = "Password";
/// Upload image path field.
pub const FIELD_IMAGE: &str = "Image file";
/// Upload caption field.
pub const FIELD_DESCRIPTION: &str = "Description";

/// Which screen the admin page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminView {
    /// Login form, shown while no token is stored
    Login,
    /// Appointments, gallery and upload panes
    Panel,
}

/// Focused pane of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Appointment list
    Appointments,
    /// Gallery list with delete
    Gallery,
    /// Upload form
    Upload,
}

impl PanelFocus {
    const fn next(self) -> Self {
        match self {
            Self::Appointments => Self::Gallery,
            Self::Gallery => Self::Upload,
            Self::Upload => Self::Appointments,
        }
    }
}

fn login_form() -> Form {
    Form::new(vec![
        Field::new(FIELD_USERNAME, FieldKind::Text),
        Field::new(FIELD_PASSWORD, FieldKind::Masked),
    ])
}

fn upload_form() -> Form {
    Form::new(vec![
        Field::new(FIELD_IMAGE, FieldKind::Text),
        Field::new(FIELD_DESCRIPTION, FieldKind::Text),
    ])
}

/// State and behaviour of the admin page.
pub struct AdminController {
    store: Box<dyn KeyValueStore>,
    attach_token: bool,
    warned_unattached: bool,
    pub(crate) view: AdminView,
    pub(crate) focus: PanelFocus,
    pub(crate) login: Form,
    pub(crate) upload: Form,
    pub(crate) appointments: Vec<Appointment>,
    pub(crate) gallery: Vec<GalleryItem>,
    pub(crate) appointment_scroll: usize,
    pub(crate) gallery_selected: usize,
    pub(crate) alert: Option<String>,
    /// Gallery item awaiting delete confirmation
    pub(crate) confirm_delete: Option<GalleryItemId>,
    pub(crate) show_help: bool,
    should_quit: bool,
}

impl AdminController {
    /// Controller reading and writing its token through `store`. `start` picks the screen.
    pub fn new(config: &Config, store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            attach_token: config.attach_token,
            warned_unattached: false,
            view: AdminView::Login,
            focus: PanelFocus::Appointments,
            login: login_form(),
            upload: upload_form(),
            appointments: Vec::new(),
            gallery: Vec::new(),
            appointment_scroll: 0,
            gallery_selected: 0,
            alert: None,
            confirm_delete: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// Show the panel if a token is stored.
    pub fn check_auth(&mut self) -> Vec<Command> {
        if self.store.token().is_some() {
            self.show_panel()
        } else {
            self.view = AdminView::Login;
            Vec::new()
        }
    }

    fn show_panel(&mut self) -> Vec<Command> {
        self.view = AdminView::Panel;
        self.load_all()
    }

    /// Both list loads, unordered.
    fn load_all(&mut self) -> Vec<Command> {
        vec![
            Command::LoadAppointments { auth: self.auth() },
            Command::LoadGallery,
        ]
    }

    /// Credential sent with admin requests.
    fn auth(&mut self) -> Option<String> {
        if self.attach_token {
            return self.store.token();
        }
        if !self.warned_unattached {
            self.warned_unattached = true;
            tracing::warn!("Admin token is not sent with requests; set SHOP_ATTACH_TOKEN=1 to send it");
        }
        None
    }

    /// Send the login form as it stands.
    pub fn submit_login(&self) -> Vec<Command> {
        vec![Command::Login(Credentials {
            username: self.login.value(FIELD_USERNAME).to_string(),
            password: self.login.value(FIELD_PASSWORD).to_string(),
        })]
    }

    fn logged_in(&mut self, result: Result<LoginResponse>) -> Vec<Command> {
        match result {
            Ok(response) => match response.token() {
                Some(token) => {
                    if let Err(e) = self.store.store_token(token) {
                        tracing::error!("Could not save admin token: {e}");
                    }
                    self.show_panel()
                }
                None => {
                    self.alert = Some(messages::INVALID_CREDENTIALS.to_string());
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::error!("Error logging in: {e}");
                self.alert = Some(messages::LOGIN_FAILED.to_string());
                Vec::new()
            }
        }
    }

    /// Ask for confirmation before deleting the selected gallery item.
    pub fn request_delete(&mut self) {
        if let Some(item) = self.gallery.get(self.gallery_selected) {
            self.confirm_delete = Some(item.id.clone());
        }
    }

    /// Answer the pending confirmation.
    pub fn confirm(&mut self, yes: bool) -> Vec<Command> {
        match self.confirm_delete.take() {
            Some(id) if yes => vec![Command::DeleteGalleryItem {
                id,
                auth: self.auth(),
            }],
            _ => Vec::new(),
        }
    }

    /// Upload the chosen image with its description. Paths may start with `~`.
    pub fn submit_upload(&mut self) -> Vec<Command> {
        let path = self.upload.value(FIELD_IMAGE).trim();
        let image = PathBuf::from(shellexpand::tilde(path).as_ref());
        let upload = GalleryUpload {
            image,
            description: self.upload.value(FIELD_DESCRIPTION).to_string(),
        };
        vec![Command::UploadGalleryItem {
            upload,
            auth: self.auth(),
        }]
    }

    fn uploaded(&mut self, result: Result<UploadResponse>) -> Vec<Command> {
        match result {
            Ok(UploadResponse { success: true }) => {
                self.upload.clear();
                vec![Command::LoadGallery]
            }
            Ok(_) => {
                tracing::debug!("Upload not accepted, keeping the form");
                Vec::new()
            }
            Err(e) => {
                tracing::error!("Error uploading image: {e}");
                self.alert = Some(messages::UPLOAD_FAILED.to_string());
                Vec::new()
            }
        }
    }

    fn gallery_loaded(&mut self, items: Vec<GalleryItem>) {
        self.gallery = items;
        self.gallery_selected = self.gallery_selected.min(self.gallery.len().saturating_sub(1));
    }

    fn handle_login_key(&mut self, key: KeyEvent, ctx: &InputContext) -> Vec<Command> {
        match self.login.handle(key, ctx) {
            InputResult::Submit => self.submit_login(),
            _ => Vec::new(),
        }
    }

    fn handle_panel_key(&mut self, key: KeyEvent, ctx: &InputContext) -> Vec<Command> {
        if self.focus == PanelFocus::Upload {
            if key.code == KeyCode::Esc {
                self.focus = PanelFocus::Gallery;
                return Vec::new();
            }
            // Tab moves between upload fields, BackTab past the first leaves
            if key.code == KeyCode::BackTab && self.upload.focus() == 0 {
                self.focus = PanelFocus::Gallery;
                return Vec::new();
            }
            return match self.upload.handle(key, ctx) {
                InputResult::Submit => self.submit_upload(),
                _ => Vec::new(),
            };
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                if self.focus == PanelFocus::Upload {
                    self.upload.focus_first();
                }
            }
            KeyCode::Char('u') => {
                self.focus = PanelFocus::Upload;
                self.upload.focus_first();
            }
            KeyCode::Char('r') => return self.load_all(),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Char('d') | KeyCode::Delete if self.focus == PanelFocus::Gallery => {
                self.request_delete();
            }
            _ => {}
        }
        Vec::new()
    }

    fn move_selection(&mut self, delta: isize) {
        let (value, len) = match self.focus {
            PanelFocus::Appointments => (&mut self.appointment_scroll, self.appointments.len()),
            PanelFocus::Gallery => (&mut self.gallery_selected, self.gallery.len()),
            PanelFocus::Upload => return,
        };
        *value = value
            .saturating_add_signed(delta)
            .min(len.saturating_sub(1));
    }

    /// Message shown over the page, if any.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Close the alert.
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Screen currently shown.
    pub const fn view(&self) -> AdminView {
        self.view
    }

    /// Focused panel pane.
    pub const fn focus(&self) -> PanelFocus {
        self.focus
    }

    /// Login form, for filling in.
    pub fn login_form_mut(&mut self) -> &mut Form {
        &mut self.login
    }

    /// Upload form state.
    pub fn upload_form(&self) -> &Form {
        &self.upload
    }

    /// Upload form, for filling in.
    pub fn upload_form_mut(&mut self) -> &mut Form {
        &mut self.upload
    }

    /// Appointments as returned by the server.
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Appointment cards as displayed, in the local time zone.
    pub fn appointment_cards(&self) -> Vec<AppointmentCard> {
        view::appointment_cards(&self.appointments, &Local)
    }

    /// Gallery as last loaded.
    pub fn gallery(&self) -> &[GalleryItem] {
        &self.gallery
    }

    /// Select a gallery item; out of range indexes clamp to the last one.
    pub fn select_gallery_item(&mut self, index: usize) {
        self.gallery_selected = index.min(self.gallery.len().saturating_sub(1));
    }

    /// Item waiting on the delete confirmation.
    pub const fn pending_delete(&self) -> Option<&GalleryItemId> {
        self.confirm_delete.as_ref()
    }

    /// Token in the local store, if any.
    pub fn stored_token(&self) -> Option<String> {
        self.store.token()
    }
}

impl Page for AdminController {
    fn start(&mut self) -> Vec<Command> {
        self.check_auth()
    }

    fn resize(&mut self, _width: u16, _height: u16) {}

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        let editing = match self.view {
            AdminView::Login => true,
            AdminView::Panel => self.focus == PanelFocus::Upload,
        };
        let ctx = InputContext {
            editing,
            has_modal: self.alert.is_some() || self.confirm_delete.is_some(),
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
        if self.confirm_delete.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => self.confirm(true),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => self.confirm(false),
                _ => Vec::new(),
            };
        }
        if self.show_help {
            if key.code == KeyCode::Esc {
                self.show_help = false;
            }
            return Vec::new();
        }

        match self.view {
            AdminView::Login => self.handle_login_key(key, &ctx),
            AdminView::Panel => self.handle_panel_key(key, &ctx),
        }
    }

    fn handle_paste(&mut self, text: &str) {
        if self.alert.is_some() || self.confirm_delete.is_some() {
            return;
        }
        match self.view {
            AdminView::Login => self.login.paste(text),
            AdminView::Panel if self.focus == PanelFocus::Upload => self.upload.paste(text),
            AdminView::Panel => {}
        }
    }

    fn apply(&mut self, update: AppUpdate) -> Vec<Command> {
        match update {
            AppUpdate::LoggedIn(result) => self.logged_in(result),
            AppUpdate::AppointmentsLoaded(Ok(appointments)) => {
                tracing::debug!("Loaded {} appointments", appointments.len());
                self.appointments = appointments;
                self.appointment_scroll = 0;
                Vec::new()
            }
            AppUpdate::AppointmentsLoaded(Err(e)) => {
                tracing::error!("Error loading appointments: {e}");
                Vec::new()
            }
            AppUpdate::GalleryLoaded(Ok(items)) => {
                self.gallery_loaded(items);
                Vec::new()
            }
            AppUpdate::GalleryLoaded(Err(e)) => {
                tracing::error!("Error loading gallery items: {e}");
                Vec::new()
            }
            AppUpdate::GalleryUploaded(result) => self.uploaded(result),
            AppUpdate::GalleryDeleted(result) => {
                if let Err(e) = result {
                    tracing::error!("Error deleting gallery item: {e}");
                }
                vec![Command::LoadGallery]
            }
            AppUpdate::Booked(_) => {
                tracing::debug!("Admin page ignoring booking result");
                Vec::new()
            }
        }
    }

    fn draw(&mut self, f: &mut Frame) {
        crate::ui::admin::draw(f, self);
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }
}
