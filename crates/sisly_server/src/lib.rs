//! sisly-server
//!
//! HTTP boundary of the Sisly Resort reservation backend. Guests submit
//! bookings through the public endpoint; staff list, inspect, edit, delete
//! and bulk-expire them through the admin endpoints. Every endpoint talks
//! straight to the reservation store, there is no layer in between.
//!
//! The admin surface is assumed trusted: the server performs no
//! authentication and is expected to sit behind whatever front door the
//! resort operates.

pub(crate) mod api;
pub mod app;
pub mod error;
pub(crate) mod openapi;
pub(crate) mod reservations;

pub use app::{Server, ServerState};
pub use error::Error;

#[derive(serde::Deserialize, Debug)]
pub struct Config {
    pub url: String,
    pub port: u16,
}
