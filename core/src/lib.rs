//! Async API client core for the gigs service.
//!
//! # Overview
//! `GigApi` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network. `GigClient` layers a session on top: it
//! holds the bearer token returned by log-in, the last fetched gig list, and
//! a `Transport` that performs the actual round-trip.
//!
//! # Design
//! - Request building and response parsing stay pure, so every status and
//!   body edge case is testable without a server.
//! - The session sits behind a `tokio::sync::RwLock`; the bearer is cloned
//!   out before a request is sent and written only after a successful log-in.
//! - `Transport` is the single I/O seam. `UreqTransport` runs each request on
//!   tokio's blocking pool; tests substitute a scripted transport.
//! - Every failure resolves to one `GigError` kind. Causes are logged with
//!   `tracing`, never exposed.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::GigApi;
pub use client::GigClient;
pub use config::{ClientConfig, CreateGigMode, DEFAULT_BASE_URL};
pub use error::{GigError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Bearer, Gig, User};
