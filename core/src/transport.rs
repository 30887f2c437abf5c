//! The I/O seam between `GigClient` and the network.
//!
//! # Design
//! `Transport::execute` takes an `HttpRequest` and resolves exactly once with
//! either an `HttpResponse` (any status) or a `TransportError`. Status codes
//! are never errors at this layer; interpreting them is `GigApi`'s job.
//!
//! `UreqTransport` drives a blocking `ureq::Agent` on tokio's blocking pool,
//! so the calling task is suspended, not blocked, while the request is in
//! flight.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Largest response body read into memory.
pub const MAX_BODY_BYTES: u64 = 10 * 1024 * 1024;

pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Default transport backed by `ureq`.
///
/// Requests run through `tokio::task::spawn_blocking`, so the future returned
/// by `execute` must be polled inside a Tokio runtime; polling it anywhere
/// else panics. Bodies are returned as raw bytes, capped at `MAX_BODY_BYTES`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        // 4xx/5xx come back as data so `GigApi` can map them per operation.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Some(Duration::from_secs(30)))
    }
}

impl Transport for UreqTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        let agent = self.agent.clone();
        async move { tokio::task::spawn_blocking(move || send(&agent, request)).await? }
    }
}

fn send(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, TransportError> {
    debug!(method = request.method.as_str(), path = %request.path, "sending request");

    let mut response = match request.method {
        HttpMethod::Get => {
            let mut builder = agent.get(request.path.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()?
        }
        HttpMethod::Post => {
            let mut builder = agent.post(request.path.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            match &request.body {
                Some(body) => builder.send(body.as_bytes())?,
                None => builder.send_empty()?,
            }
        }
    };

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    // Raw bytes: whether the payload decodes is the parser's call, not ours.
    let body = response
        .body_mut()
        .with_config()
        .limit(MAX_BODY_BYTES)
        .read_to_vec()?;
    debug!(status, path = %request.path, "received response");

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
