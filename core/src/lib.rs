//! Data-access client for the hero API.
//!
//! # Overview
//! `HeroClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network. `HeroService` wraps it with an injected
//! `Transport` and `MessageLog`: every call issues one request, logs the
//! outcome, and falls back to a default value instead of returning an error.
//!
//! # Design
//! - `HeroClient` is stateless; it holds only the heroes endpoint URL.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary stays explicit and the facade can be tested with a scripted
//!   transport.
//! - `UreqTransport` is the blocking transport used outside tests.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod messages;
pub mod service;
pub mod transport;
pub mod types;

pub use client::HeroClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use messages::{MessageLog, MessageService};
pub use service::HeroService;
pub use transport::UreqTransport;
pub use types::{Hero, NewHero};
