//! HTTP client for the shop REST API.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::api::types::{
    Appointment, BookingResponse, Credentials, GalleryItem, GalleryItemId, GalleryUpload,
    LoginResponse, UploadResponse,
};
use crate::config::Config;
use crate::constants::api;
use crate::error::{Error, Result};

/// Operations the pages need from the shop API.
///
/// The terminal pages only ever talk to this trait, so tests can drive
/// them with an in-memory implementation.
#[async_trait]
pub trait ShopApi: Send + Sync {
    /// `POST /api/login`
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// `GET /api/appointments`
    async fn appointments(&self, auth: Option<&str>) -> Result<Vec<Appointment>>;

    /// `GET /api/gallery`
    async fn gallery(&self) -> Result<Vec<GalleryItem>>;

    /// `POST /api/gallery` as multipart (`image`, `description`)
    async fn upload_gallery_item(
        &self,
        upload: &GalleryUpload,
        auth: Option<&str>,
    ) -> Result<UploadResponse>;

    /// `DELETE /api/gallery/{id}`
    async fn delete_gallery_item(&self, id: &GalleryItemId, auth: Option<&str>) -> Result<()>;

    /// `POST /api/book-appointment`
    async fn book_appointment(&self, appointment: &Appointment) -> Result<BookingResponse>;
}

/// HTTP client for the shop REST API
#[derive(Clone)]
pub struct ShopClient {
    base_url: String,
    client: Client,
}

impl ShopClient {
    /// Create a new shop client from config
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            client: Client::builder()
                .timeout(config.request_timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of a single gallery item, with the id escaped as one path segment
    fn item_url(&self, id: &GalleryItemId) -> Result<Url> {
        let invalid = || {
            Error::config(
                format!("Base URL '{}' cannot hold a gallery path", self.base_url),
                "Check SHOP_BASE_URL",
            )
        };
        let mut url = Url::parse(&self.url(api::GALLERY)).map_err(|_| invalid())?;
        url.path_segments_mut().map_err(|()| invalid())?.push(id.as_str());
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response> {
        tracing::debug!("Sending request to {}", path);
        request
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {path} failed: {e}")))
    }

    /// Decode a JSON body, refusing non-2xx responses
    async fn read_json<T: DeserializeOwned>(resp: Response, path: &str) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::api_status(
                format!("Request to {path} returned {status}"),
                status.as_u16(),
            ));
        }

        resp.json()
            .await
            .map_err(|e| Error::parse(format!("Invalid JSON from {path}: {e}"), None))
    }

    /// Decode a JSON body whatever the status, for endpoints that explain
    /// refusals in the body (login, booking)
    async fn read_json_any_status<T: DeserializeOwned>(resp: Response, path: &str) -> Result<T> {
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("Reading response from {path} failed: {e}")))?;

        match serde_json::from_slice(&body) {
            Ok(value) => {
                if !status.is_success() {
                    tracing::warn!("{} returned {} with a readable body", path, status);
                }
                Ok(value)
            }
            Err(e) if status.is_success() => {
                Err(Error::parse(format!("Invalid JSON from {path}: {e}"), None))
            }
            Err(_) => Err(Error::api_status(
                format!("Request to {path} returned {status}"),
                status.as_u16(),
            )),
        }
    }
}

fn authorize(request: RequestBuilder, auth: Option<&str>) -> RequestBuilder {
    match auth {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Content type for an upload, from the file extension
fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl ShopApi for ShopClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let request = self.client.post(self.url(api::LOGIN)).json(credentials);
        let resp = self.send(request, api::LOGIN).await?;
        Self::read_json_any_status(resp, api::LOGIN).await
    }

    async fn appointments(&self, auth: Option<&str>) -> Result<Vec<Appointment>> {
        let request = authorize(self.client.get(self.url(api::APPOINTMENTS)), auth);
        let resp = self.send(request, api::APPOINTMENTS).await?;
        Self::read_json(resp, api::APPOINTMENTS).await
    }

    async fn gallery(&self) -> Result<Vec<GalleryItem>> {
        let request = self.client.get(self.url(api::GALLERY));
        let resp = self.send(request, api::GALLERY).await?;
        Self::read_json(resp, api::GALLERY).await
    }

    async fn upload_gallery_item(
        &self,
        upload: &GalleryUpload,
        auth: Option<&str>,
    ) -> Result<UploadResponse> {
        let bytes = fs_err::tokio::read(&upload.image)
            .await
            .map_err(|e| Error::io(e, upload.image.clone()))?;

        let file_name = upload
            .image
            .file_name()
            .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(image_mime(&upload.image))
            .map_err(|e| Error::Msg(format!("Invalid upload content type: {e}")))?;

        let form = Form::new()
            .part("image", part)
            .text("description", upload.description.clone());

        let request = authorize(self.client.post(self.url(api::GALLERY)).multipart(form), auth);
        let resp = self.send(request, api::GALLERY).await?;
        Self::read_json(resp, api::GALLERY).await
    }

    async fn delete_gallery_item(&self, id: &GalleryItemId, auth: Option<&str>) -> Result<()> {
        let url = self.item_url(id)?;
        let path = url.path().to_string();
        let request = authorize(self.client.delete(url), auth);
        let resp = self.send(request, &path).await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::api_status(
                format!("Request to {path} returned {status}"),
                status.as_u16(),
            ));
        }
        Ok(())
    }

    async fn book_appointment(&self, appointment: &Appointment) -> Result<BookingResponse> {
        let request = self
            .client
            .post(self.url(api::BOOK_APPOINTMENT))
            .json(appointment);
        let resp = self.send(request, api::BOOK_APPOINTMENT).await?;
        Self::read_json_any_status(resp, api::BOOK_APPOINTMENT).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    fn client(base: &str) -> ShopClient {
        ShopClient::new(&Config::default().with_base_url(base))
    }

    #[test]
    fn item_urls_escape_ids() {
        let client = client("http://localhost:3000");
        let url = client.item_url(&GalleryItemId::new("a b/c")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/gallery/a%20b%2Fc");
    }

    #[test]
    fn item_urls_keep_base_path() {
        let client = client("https://shop.example.com/v1");
        let url = client.item_url(&GalleryItemId::new("7")).unwrap();
        assert_eq!(url.path(), "/v1/api/gallery/7");
    }

    #[test]
    fn upload_mime_follows_extension() {
        assert_eq!(image_mime(Path::new("cut.JPG")), "image/jpeg");
        assert_eq!(image_mime(Path::new("fade.png")), "image/png");
        assert_eq!(image_mime(Path::new("noext")), "application/octet-stream");
    }

    #[tokio::test]
    async fn upload_of_missing_file_fails_before_any_request() {
        // Port 9 (discard) would refuse; the file read fails first.
        let client = client("http://127.0.0.1:9");
        let upload = GalleryUpload {
            image: "/definitely/not/here.jpg".into(),
            description: "x".into(),
        };
        let err = client.upload_gallery_item(&upload, None).await.unwrap_err();
        assert!(matches!(err, Error::Io { path: Some(_), .. }));
    }
}
