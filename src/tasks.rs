//! Background requests and their results.
//!
//! Page controllers never await the network themselves. They return
//! [`Command`]s; the [`Dispatcher`] runs each one on its own tokio task and
//! sends the matching [`AppUpdate`] back over a channel that the run loop
//! drains once per frame.

use futures::future;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::api::types::{
    Appointment, BookingResponse, Credentials, GalleryItem, GalleryItemId, GalleryUpload,
    LoginResponse, UploadResponse,
};
use crate::api::ShopApi;
use crate::error::Result;

/// A request a page wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log in with the admin credentials
    Login(Credentials),
    /// Fetch every appointment
    LoadAppointments {
        /// Admin token to send, if any
        auth: Option<String>,
    },
    /// Fetch the public gallery
    LoadGallery,
    /// Upload an image to the gallery
    UploadGalleryItem {
        /// Image and caption
        upload: GalleryUpload,
        /// Admin token to send, if any
        auth: Option<String>,
    },
    /// Remove a gallery item
    DeleteGalleryItem {
        /// Item to remove
        id: GalleryItemId,
        /// Admin token to send, if any
        auth: Option<String>,
    },
    /// Send a booking
    BookAppointment(Appointment),
}

/// Result of a finished [`Command`], sent back to the page.
#[derive(Debug)]
pub enum AppUpdate {
    /// Reply to [`Command::Login`]
    LoggedIn(Result<LoginResponse>),
    /// Reply to [`Command::LoadAppointments`]
    AppointmentsLoaded(Result<Vec<Appointment>>),
    /// Reply to [`Command::LoadGallery`]
    GalleryLoaded(Result<Vec<GalleryItem>>),
    /// Reply to [`Command::UploadGalleryItem`]
    GalleryUploaded(Result<UploadResponse>),
    /// Reply to [`Command::DeleteGalleryItem`]
    GalleryDeleted(Result<()>),
    /// Reply to [`Command::BookAppointment`]
    Booked(Result<BookingResponse>),
}

/// Perform one command against the API.
pub async fn execute(api: &dyn ShopApi, command: Command) -> AppUpdate {
    match command {
        Command::Login(credentials) => AppUpdate::LoggedIn(api.login(&credentials).await),
        Command::LoadAppointments { auth } => {
            AppUpdate::AppointmentsLoaded(api.appointments(auth.as_deref()).await)
        }
        Command::LoadGallery => AppUpdate::GalleryLoaded(api.gallery().await),
        Command::UploadGalleryItem { upload, auth } => AppUpdate::GalleryUploaded(
            api.upload_gallery_item(&upload, auth.as_deref()).await,
        ),
        Command::DeleteGalleryItem { id, auth } => {
            AppUpdate::GalleryDeleted(api.delete_gallery_item(&id, auth.as_deref()).await)
        }
        Command::BookAppointment(appointment) => {
            AppUpdate::Booked(api.book_appointment(&appointment).await)
        }
    }
}

/// Perform several commands concurrently, returning updates in command order.
pub async fn execute_all(api: &dyn ShopApi, commands: Vec<Command>) -> Vec<AppUpdate> {
    future::join_all(commands.into_iter().map(|command| execute(api, command))).await
}

/// Spawns commands onto the tokio runtime and routes results to the page.
#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn ShopApi>,
    tx: mpsc::Sender<AppUpdate>,
}

impl Dispatcher {
    /// Create a dispatcher sending results into `tx`
    pub fn new(api: Arc<dyn ShopApi>, tx: mpsc::Sender<AppUpdate>) -> Self {
        Self { api, tx }
    }

    /// Spawn one task per command; there is no ordering between them.
    pub fn dispatch(&self, commands: Vec<Command>) {
        for command in commands {
            let api = Arc::clone(&self.api);
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let update = execute(api.as_ref(), command).await;
                if tx.send(update).await.is_err() {
                    tracing::debug!("Page closed before a request finished");
                }
            });
        }
    }
}
