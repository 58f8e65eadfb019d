//! View models for the appointment and gallery lists.
//!
//! Rendering a list is a pure function of the data: the ratatui code only
//! lays these out.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::api::types::{Appointment, GalleryItem, GalleryItemId};

const INVALID_DATE: &str = "Invalid Date";
const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Format a server date/time for display in `tz`.
///
/// Strings with an offset are converted into `tz`, naive date-times are
/// taken as already local to `tz`, and bare dates are midnight UTC.
/// Anything unparseable displays as `Invalid Date`.
pub fn format_datetime<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    parse_datetime(raw.trim(), tz).map_or_else(
        || INVALID_DATE.to_string(),
        |dt| dt.format(DISPLAY_FORMAT).to_string(),
    )
}

fn parse_datetime<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }
    let zoned = raw
        .strip_suffix(['Z', 'z'])
        .map_or_else(|| raw.to_string(), |s| format!("{s}+00:00"));
    for format in ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(dt) = DateTime::parse_from_str(&zoned, format) {
            return Some(dt.with_timezone(tz));
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?);
    Some(midnight.with_timezone(tz))
}

/// One appointment as shown in the admin list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentCard {
    /// Customer name, used as the card heading
    pub name: String,
    /// Labelled lines under the name
    pub details: Vec<String>,
}

/// Build the admin appointment cards, in server order.
pub fn appointment_cards<Tz: TimeZone>(appointments: &[Appointment], tz: &Tz) -> Vec<AppointmentCard>
where
    Tz::Offset: std::fmt::Display,
{
    appointments
        .iter()
        .map(|a| AppointmentCard {
            name: a.name.clone(),
            details: vec![
                format!("Service: {}", a.service),
                format!("Date/Time: {}", format_datetime(&a.datetime, tz)),
                format!("Email: {}", a.email),
                format!("Phone: {}", a.phone),
            ],
        })
        .collect()
}

/// One gallery image as shown on either page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryTile {
    /// Server id of the item
    pub id: GalleryItemId,
    /// Description, or a placeholder when empty
    pub caption: String,
    /// Resolved image URL
    pub image_url: String,
}

/// Build gallery tiles, in server order.
pub fn gallery_tiles(items: &[GalleryItem]) -> Vec<GalleryTile> {
    items
        .iter()
        .map(|item| GalleryTile {
            id: item.id.clone(),
            caption: item.description.clone(),
            image_url: item.image_url.clone(),
        })
        .collect()
}
