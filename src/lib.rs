//! Kyrazo: async client for the Kyrazo webhook platform.
//!
//! A library for publishing events and managing the sources, targets and
//! endpoints of a Kyrazo project over its HTTP API.
//!
//! Every operation returns `Result<T, ApiError>`; the HTTP status of a failed
//! response selects the [`ApiError`] variant.

pub mod config;
pub mod error;
pub mod models;
pub mod resources;
pub mod time;
pub mod transport;

mod client;


pub use client::{DefaultHttpClient, Kyrazo};
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ErrorKind};
