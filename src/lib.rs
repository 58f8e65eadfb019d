//! `shopfront` - barbershop site and admin client for the terminal.
//!
//! The public page shows a rotating barber pole, the shop gallery and an
//! appointment booking form. The admin page, gated on a stored login
//! token, lists appointments and manages the gallery. Both talk to the
//! shop REST API through [`api::ShopApi`].

pub mod admin;
pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod input;
pub mod logging;
pub mod motion;
pub mod page;
pub mod pole;
pub mod session;
pub mod site;
pub mod tasks;
pub mod ui;
pub mod view;
