//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Shop API constants.
pub mod api {
    /// Default base URL for the shop API.
    pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

    /// Default per-request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Login endpoint.
    pub const LOGIN: &str = "/api/login";

    /// Appointment listing endpoint.
    pub const APPOINTMENTS: &str = "/api/appointments";

    /// Gallery listing and upload endpoint; items live under it by id.
    pub const GALLERY: &str = "/api/gallery";

    /// Booking endpoint.
    pub const BOOK_APPOINTMENT: &str = "/api/book-appointment";
}

/// Persisted client state.
pub mod storage {
    /// Name of the key-value file inside the storage directory.
    pub const FILE_NAME: &str = "storage.json";

    /// Key the admin token is stored under.
    pub const TOKEN_KEY: &str = "adminToken";
}

/// User-facing alert texts.
pub mod messages {
    /// Booking form is missing a field.
    pub const FILL_ALL_FIELDS: &str = "Please fill in all fields.";

    /// Booking request failed in transport.
    pub const BOOKING_FAILED: &str =
        "There was an error booking your appointment. Please try again later.";

    /// Login response carried no token.
    pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

    /// Login request failed in transport.
    pub const LOGIN_FAILED: &str = "Login failed. Please try again.";

    /// Gallery upload failed in transport.
    pub const UPLOAD_FAILED: &str = "Failed to upload image. Please try again.";

    /// Delete confirmation prompt.
    pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this image?";
}

/// Booking form constants.
pub mod booking {
    /// Submit label while idle.
    pub const SUBMIT_LABEL: &str = "Book Appointment";

    /// Submit label while a request is in flight.
    pub const BUSY_LABEL: &str = "Booking...";

    /// Service categories offered by the shop.
    pub const SERVICES: &[&str] = &[
        "Haircut",
        "Beard Trim",
        "Hot Towel Shave",
        "Haircut & Beard",
        "Kids Cut",
    ];
}

/// Barber pole scene constants.
pub mod pole {
    /// Cylinder radius in world units.
    pub const RADIUS: f32 = 0.5;

    /// Cylinder height in world units.
    pub const HEIGHT: f32 = 4.0;

    /// Stripe texture edge length in pixels.
    pub const TEXTURE_SIZE: usize = 256;

    /// Stripe width in texture pixels.
    pub const STRIPE_WIDTH: usize = 30;

    /// Texture base colour.
    pub const BASE_COLOR: [u8; 3] = [0xff, 0xff, 0xff];

    /// Stripe colour (#d4af37).
    pub const STRIPE_COLOR: [u8; 3] = [0xd4, 0xaf, 0x37];

    /// Texture repeat (horizontal, vertical).
    pub const TEXTURE_REPEAT: (f32, f32) = (2.0, 4.0);

    /// Mesh rotation added per frame, in radians.
    pub const ROTATION_STEP: f32 = 0.01;

    /// Texture vertical offset added per frame.
    pub const SCROLL_STEP: f32 = -0.01;

    /// Material specular colour (0x666666).
    pub const SPECULAR: f32 = 0x66 as f32 / 255.0;

    /// Material shininess exponent.
    pub const SHININESS: f32 = 30.0;

    /// Ambient light intensity.
    pub const AMBIENT_INTENSITY: f32 = 0.5;

    /// Directional light intensity.
    pub const DIRECTIONAL_INTENSITY: f32 = 1.0;

    /// Directional light position; it shines towards the origin.
    pub const LIGHT_POSITION: (f32, f32, f32) = (5.0, 5.0, 5.0);

    /// Camera vertical field of view in degrees.
    pub const FOV_DEGREES: f32 = 75.0;

    /// Camera near plane.
    pub const NEAR: f32 = 0.1;

    /// Camera far plane.
    pub const FAR: f32 = 1000.0;

    /// Camera start position.
    pub const CAMERA_POSITION: (f32, f32, f32) = (0.0, 0.0, 5.0);

    /// Orbit damping factor.
    pub const DAMPING_FACTOR: f32 = 0.05;

    /// Orbit auto-rotate speed (2.0 is one orbit per 30 s at 60 fps).
    pub const AUTO_ROTATE_SPEED: f32 = 2.0;
}

/// Loading overlay constants.
pub mod loader {
    use std::time::Duration;

    /// Default interval between simulated progress steps.
    pub const TICK: Duration = Duration::from_millis(500);

    /// Upper bound (exclusive) of a single random progress step.
    pub const MAX_STEP: f32 = 30.0;

    /// Overlay fade-out duration.
    pub const FADE: Duration = Duration::from_secs(1);
}

/// Entrance and scroll animation constants.
pub mod motion {
    /// Animated offset pixels per document row.
    pub const PIXELS_PER_ROW: f32 = 25.0;

    /// Smooth-scroll duration in seconds.
    pub const SCROLL_SECONDS: f32 = 0.6;

    /// Stagger between service cards in seconds.
    pub const SERVICE_STAGGER: f32 = 0.2;
}

/// Run loop constants.
pub mod runtime {
    use std::time::Duration;

    /// Target frame interval for drawing and animation.
    pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

    /// Channel buffer size for async task communication.
    pub const CHANNEL_BUFFER_SIZE: usize = 64;
}

/// UI layout constants.
pub mod ui {
    /// Gallery grid columns on the public page.
    pub const GALLERY_COLUMNS: usize = 3;

    /// Rows per gallery tile on the public page.
    pub const GALLERY_TILE_ROWS: u16 = 4;

    /// Rows scrolled per page step.
    pub const PAGE_STEP: f32 = 10.0;
}
