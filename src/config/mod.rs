//! Configuration layer for the Kyrazo client.
//!
//! This module provides:
//! - The validated connection configuration ([`ClientConfig`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Configuration file template ([`default_config_template`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! When building from a file with [`ClientConfig::from_toml`] or
//! [`ClientConfig::load`], values are resolved with the following priority
//! (highest to lowest):
//!
//! 1. **TOML config file** - Values from the `[client]` section
//! 2. **Environment** - `KYRAZO_API_KEY` and `KYRAZO_BASE_URL`
//! 3. **Built-in defaults** - See [`defaults`]
//!
//! The API key has no default; it must come from the file, the environment
//! or [`ClientConfig::new`].

mod client_config;
pub mod defaults;
mod error;
mod toml;


pub use client_config::ClientConfig;
pub use error::{ConfigError, field};
pub use self::toml::{ClientSection, TomlConfig, default_config_template};
