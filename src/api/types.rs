//! Shop API data types.
//!
//! These types mirror the JSON shapes of the shop API. The client never
//! assigns identity to appointments; gallery items carry a server id.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A customer booking for a service at a given date/time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Appointment {
    /// Customer name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// ISO date/time as entered or stored by the server
    pub datetime: String,
    /// Service category label
    pub service: String,
}

/// Gallery item identifier.
///
/// Servers hand these out as strings or numbers; both normalise to a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GalleryItemId(pub String);

impl GalleryItemId {
    /// Create a new `GalleryItemId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GalleryItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GalleryItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for GalleryItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

/// An uploaded image with descriptive text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    /// Server-assigned id
    pub id: GalleryItemId,
    /// Image location, relative to the API base URL unless absolute
    pub image_url: String,
    /// Caption; may be empty
    #[serde(default)]
    pub description: String,
}

/// Body of `POST /api/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Admin user name
    pub username: String,
    /// Admin password, sent as entered
    pub password: String,
}

/// Result of logging in. A missing token means the login was refused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    /// Issued token. Use [`LoginResponse::token`] to read it.
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    /// The issued token, treating an empty string the same as no token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Result of `POST /api/book-appointment`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookingResponse {
    /// Confirmation text to show the customer
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of `POST /api/gallery`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    /// Whether the server stored the image
    #[serde(default)]
    pub success: bool,
}

/// A gallery upload as entered in the admin form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryUpload {
    /// Local image file sent as the `image` part
    pub image: PathBuf,
    /// Sent as the `description` part
    pub description: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    #[test]
    fn gallery_ids_accept_strings_and_numbers() {
        let items: Vec<GalleryItem> = serde_json::from_str(
            r#"[{"id":"a1","imageUrl":"/u/a.jpg","description":"Fade"},
                {"id":42,"imageUrl":"/u/b.jpg"}]"#,
        )
        .unwrap();

        assert_eq!(items[0].id, GalleryItemId::new("a1"));
        assert_eq!(items[1].id.as_str(), "42");
        assert_eq!(items[1].description, "");
    }

    #[test]
    fn login_without_token_is_refusal() {
        let resp: LoginResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.token(), None);

        let resp: LoginResponse = serde_json::from_str(r#"{"token":""}"#).unwrap();
        assert_eq!(resp.token(), None);

        let resp: LoginResponse = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert_eq!(resp.token(), Some("abc"));
    }

    #[test]
    fn upload_success_defaults_to_false() {
        let resp: UploadResponse = serde_json::from_str(r#"{"error":"too big"}"#).unwrap();
        assert!(!resp.success);
    }

    #[test]
    fn appointment_serializes_with_wire_names() {
        let appt = Appointment {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            phone: "555-0100".into(),
            datetime: "2024-05-01T14:30".into(),
            service: "Haircut".into(),
        };
        let json = serde_json::to_value(&appt).unwrap();
        assert_eq!(json["datetime"], "2024-05-01T14:30");
        assert_eq!(json["service"], "Haircut");
    }
}
