//! Shop API integration.
//!
//! Provides the HTTP client for the shop's REST API and the wire types it
//! exchanges, plus the [`ShopApi`] seam the page controllers are driven through.

/// API client for shop requests
pub mod client;
/// Data types exchanged with the shop API
pub mod types;

// Re-export key components
pub use client::{ShopApi, ShopClient};
