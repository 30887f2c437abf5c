//! Error types for the gigs API client.
//!
//! # Design
//! `GigError` has one unit variant per failure class. Underlying causes
//! (transport failures, serde messages, unexpected statuses) are logged where
//! they happen and are not carried in the error, so callers match on the kind
//! alone. `TransportError` is what a `Transport` reports; `GigClient` maps it
//! to the `GigError` kind of the operation in flight.

use thiserror::Error;

/// Errors returned by `GigApi` parse methods and `GigClient` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GigError {
    /// Sign-up hit a transport error, a non-200 status, or could not encode
    /// the user.
    #[error("sign up failed")]
    SignUpFailed,

    /// Log-in hit a transport error, a non-200 status, or returned a body
    /// that is not a bearer token.
    #[error("sign in failed")]
    SignInFailed,

    /// Log-in returned 200 with an empty body.
    #[error("no data received")]
    NoData,

    /// A gig operation was called without a stored bearer token.
    #[error("not signed in")]
    NotSignedIn,

    /// A gig request hit a transport error or a non-200 status.
    #[error("failed to fetch gigs")]
    FailedFetch,

    /// A gig response was empty or not a list of gigs.
    #[error("bad gig data")]
    BadData,

    /// Legacy gig creation returned a body that is not a list of gigs.
    #[error("bad gig url response")]
    BadUrl,
}

/// Failures reported by a `Transport` before any status code is available.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http transport failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("transport worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("{0}")]
    Other(String),
}
