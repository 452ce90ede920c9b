//! Transport layer between resource clients and the Kyrazo API.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Connection retries ([`RetryingClient`], [`RetryPolicy`])
//! - Authenticated request execution and error mapping ([`HttpTransport`])

mod client;
mod executor;
pub mod envelope;
mod error;
mod http;
pub mod response;
mod retry;

#[cfg(test)]
pub(crate) mod test_fixtures;


pub use client::ReqwestClient;
pub use executor::{ApiRequest, HttpTransport};
pub use error::HttpError;
pub use self::http::{HttpClient, HttpRequest, HttpResponse};
pub use retry::{RetryPolicy, RetryingClient};
