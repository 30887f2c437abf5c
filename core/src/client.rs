//! Session-holding async client for the gigs API.
//!
//! # Design
//! `GigClient` owns a `GigApi`, a `Transport`, and a `Session`. Each operation
//! performs exactly one round-trip (or none, when the session has no bearer)
//! and resolves with a `GigError` kind on failure. The session lock is never
//! held across an `.await` on the transport: the bearer is cloned out first,
//! and the session is written only once a response has been parsed.

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::api::GigApi;
use crate::config::ClientConfig;
use crate::error::GigError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Bearer, Gig, User};

/// In-memory session state. Lost when the client is dropped.
#[derive(Debug, Default)]
struct Session {
    bearer: Option<Bearer>,
    gigs: Vec<Gig>,
}

/// Async client that signs in once and then lists and creates gigs.
///
/// `&self` methods only; wrap in an `Arc` to share between tasks.
#[derive(Debug)]
pub struct GigClient<T = UreqTransport> {
    api: GigApi,
    transport: T,
    session: RwLock<Session>,
}

impl GigClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }
}

impl Default for GigClient<UreqTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<T: Transport> GigClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            api: GigApi::new(&config),
            transport,
            session: RwLock::new(Session::default()),
        }
    }

    pub fn api(&self) -> &GigApi {
        &self.api
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn bearer(&self) -> Option<Bearer> {
        self.session.read().await.bearer.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.session.read().await.bearer.is_some()
    }

    /// Last list returned by `list_gigs`.
    pub async fn gigs(&self) -> Vec<Gig> {
        self.session.read().await.gigs.clone()
    }

    /// Forget the bearer and the cached gigs. No request is made.
    pub async fn sign_out(&self) {
        let mut session = self.session.write().await;
        session.bearer = None;
        session.gigs.clear();
    }

    pub async fn sign_up(&self, user: &User) -> Result<(), GigError> {
        let request = self.api.build_sign_up(user)?;
        let response = self.send(request, GigError::SignUpFailed).await?;
        self.api.parse_sign_up(response)?;
        info!(username = %user.username, "signed up");
        Ok(())
    }

    /// On success the returned bearer replaces any stored one. A failed
    /// log-in leaves the session as it was.
    pub async fn log_in(&self, user: &User) -> Result<(), GigError> {
        let request = self.api.build_log_in(user)?;
        let response = self.send(request, GigError::SignInFailed).await?;
        let bearer = self.api.parse_log_in(response)?;
        self.session.write().await.bearer = Some(bearer);
        info!(username = %user.username, "signed in");
        Ok(())
    }

    /// Fetch every gig and replace the cached list with the result.
    pub async fn list_gigs(&self) -> Result<Vec<Gig>, GigError> {
        let bearer = self.require_bearer().await?;
        let request = self.api.build_list_gigs(&bearer);
        let response = self.send(request, GigError::FailedFetch).await?;
        let gigs = self.api.parse_list_gigs(response)?;
        self.session.write().await.gigs = gigs.clone();
        Ok(gigs)
    }

    /// Returns the server's gig list. The cached list is left alone; call
    /// `list_gigs` to refresh it.
    pub async fn create_gig(&self, gig: &Gig) -> Result<Vec<Gig>, GigError> {
        let bearer = self.require_bearer().await?;
        let request = self.api.build_create_gig(&bearer, gig)?;
        let response = self.send(request, GigError::FailedFetch).await?;
        self.api.parse_create_gig(response)
    }

    async fn require_bearer(&self) -> Result<Bearer, GigError> {
        self.bearer().await.ok_or_else(|| {
            warn!("gig request made before signing in");
            GigError::NotSignedIn
        })
    }

    async fn send(
        &self,
        request: HttpRequest,
        on_error: GigError,
    ) -> Result<HttpResponse, GigError> {
        let path = request.path.clone();
        self.transport.execute(request).await.map_err(|e| {
            warn!(error = %e, %path, "request failed");
            on_error
        })
    }
}
