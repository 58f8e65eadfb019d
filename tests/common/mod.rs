//! Shared helpers for page flow tests.

#![allow(dead_code, clippy::unwrap_used)]

use async_trait::async_trait;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::sync::Mutex;

use shopfront::api::types::{
    Appointment, BookingResponse, Credentials, GalleryItem, GalleryItemId, GalleryUpload,
    LoginResponse, UploadResponse,
};
use shopfront::api::ShopApi;
use shopfront::error::{Error, Result};
use shopfront::page::Page;
use shopfront::tasks::{execute_all, Command};

/// A request the mock received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login(Credentials),
    Appointments(Option<String>),
    Gallery,
    Upload(GalleryUpload),
    Delete(GalleryItemId),
    Book(Appointment),
}

/// In-memory API. Each `None` reply fails like a dropped connection.
#[derive(Default)]
pub struct MockApi {
    pub login: Option<LoginResponse>,
    pub appointments: Option<Vec<Appointment>>,
    pub gallery: Option<Vec<GalleryItem>>,
    pub upload: Option<UploadResponse>,
    pub delete_ok: bool,
    pub booking: Option<BookingResponse>,
    pub log: Mutex<Vec<Call>>,
}

fn reply<T: Clone>(value: Option<&T>) -> Result<T> {
    value
        .cloned()
        .ok_or_else(|| Error::Network("connection refused".to_string()))
}

impl MockApi {
    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.log.lock().unwrap().clear();
    }

    fn record(&self, call: Call) {
        self.log.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ShopApi for MockApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.record(Call::Login(credentials.clone()));
        reply(self.login.as_ref())
    }

    async fn appointments(&self, auth: Option<&str>) -> Result<Vec<Appointment>> {
        self.record(Call::Appointments(auth.map(str::to_string)));
        reply(self.appointments.as_ref())
    }

    async fn gallery(&self) -> Result<Vec<GalleryItem>> {
        self.record(Call::Gallery);
        reply(self.gallery.as_ref())
    }

    async fn upload_gallery_item(
        &self,
        upload: &GalleryUpload,
        _auth: Option<&str>,
    ) -> Result<UploadResponse> {
        self.record(Call::Upload(upload.clone()));
        reply(self.upload.as_ref())
    }

    async fn delete_gallery_item(&self, id: &GalleryItemId, _auth: Option<&str>) -> Result<()> {
        self.record(Call::Delete(id.clone()));
        if self.delete_ok {
            Ok(())
        } else {
            Err(Error::api_status("delete failed", 500))
        }
    }

    async fn book_appointment(&self, appointment: &Appointment) -> Result<BookingResponse> {
        self.record(Call::Book(appointment.clone()));
        reply(self.booking.as_ref())
    }
}

/// Run `commands` and everything they lead to until the page goes quiet.
pub async fn pump<P: Page>(page: &mut P, api: &MockApi, mut commands: Vec<Command>) {
    while !commands.is_empty() {
        let updates = execute_all(api, commands).await;
        commands = updates.into_iter().flat_map(|u| page.apply(u)).collect();
    }
}

pub fn gallery_item(id: &str, description: &str) -> GalleryItem {
    GalleryItem {
        id: GalleryItemId::new(id),
        image_url: format!("/uploads/{id}.jpg"),
        description: description.to_string(),
    }
}

pub fn appointment(name: &str, datetime: &str) -> Appointment {
    Appointment {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "555-0100".to_string(),
        datetime: datetime.to_string(),
        service: "Haircut".to_string(),
    }
}

/// Draw `page` on a test terminal and return the screen as text.
pub fn render<P: Page>(page: &mut P, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    page.resize(width, height);
    terminal.draw(|f| page.draw(f)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..height {
        for x in 0..width {
            text.push_str(buffer.get(x, y).symbol());
        }
        text.push('\n');
    }
    text
}
