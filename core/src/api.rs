//! Stateless HTTP request builder and response parser for the gigs API.
//!
//! # Design
//! `GigApi` holds the endpoint URLs and the create mode; nothing else. Each
//! operation is split into a `build_*` method that produces an `HttpRequest`
//! and a `parse_*` method that consumes an `HttpResponse`. Whoever executes
//! the round-trip sits in between, keeping this module deterministic.
//!
//! Status handling is strict: only 200 counts as success, for every route.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::config::{ClientConfig, CreateGigMode};
use crate::error::GigError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Bearer, Gig, User};

const CONTENT_TYPE: &str = "content-type";
const AUTHORIZATION: &str = "authorization";
const APPLICATION_JSON: &str = "application/json";

/// Synchronous, stateless request builder and response parser.
#[derive(Debug, Clone)]
pub struct GigApi {
    sign_up_url: String,
    log_in_url: String,
    list_gigs_url: String,
    gig_url: String,
    create_mode: CreateGigMode,
}

impl GigApi {
    pub fn new(config: &ClientConfig) -> Self {
        let base = config.base_url.trim_end_matches('/');
        Self {
            sign_up_url: format!("{base}/users/signup"),
            log_in_url: format!("{base}/users/login"),
            list_gigs_url: format!("{base}/gigs/"),
            gig_url: format!("{base}/gigs"),
            create_mode: config.create_mode,
        }
    }

    pub fn create_mode(&self) -> CreateGigMode {
        self.create_mode
    }

    pub fn build_sign_up(&self, user: &User) -> Result<HttpRequest, GigError> {
        json_post(&self.sign_up_url, user, Vec::new()).map_err(|e| {
            warn!(error = %e, "failed to encode user for sign up");
            GigError::SignUpFailed
        })
    }

    pub fn build_log_in(&self, user: &User) -> Result<HttpRequest, GigError> {
        json_post(&self.log_in_url, user, Vec::new()).map_err(|e| {
            warn!(error = %e, "failed to encode user for log in");
            GigError::SignInFailed
        })
    }

    pub fn build_list_gigs(&self, bearer: &Bearer) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.list_gigs_url.clone(),
            headers: vec![auth_header(bearer)],
            body: None,
        }
    }

    /// In `Legacy` mode the gig is dropped: the request is a bare GET.
    pub fn build_create_gig(&self, bearer: &Bearer, gig: &Gig) -> Result<HttpRequest, GigError> {
        match self.create_mode {
            CreateGigMode::Legacy => Ok(HttpRequest {
                method: HttpMethod::Get,
                path: self.gig_url.clone(),
                headers: vec![auth_header(bearer)],
                body: None,
            }),
            CreateGigMode::Post => {
                json_post(&self.gig_url, gig, vec![auth_header(bearer)]).map_err(|e| {
                    warn!(error = %e, "failed to encode gig");
                    GigError::BadData
                })
            }
        }
    }

    pub fn parse_sign_up(&self, response: HttpResponse) -> Result<(), GigError> {
        if response.status != 200 {
            warn!(status = response.status, "sign up was unsuccessful");
            return Err(GigError::SignUpFailed);
        }
        Ok(())
    }

    pub fn parse_log_in(&self, response: HttpResponse) -> Result<Bearer, GigError> {
        if response.status != 200 {
            warn!(status = response.status, "sign in was unsuccessful");
            return Err(GigError::SignInFailed);
        }
        if response.body.is_empty() {
            warn!("sign in returned no data");
            return Err(GigError::NoData);
        }
        decode(&response.body).map_err(|e| {
            warn!(error = %e, "failed to decode bearer");
            GigError::SignInFailed
        })
    }

    pub fn parse_list_gigs(&self, response: HttpResponse) -> Result<Vec<Gig>, GigError> {
        parse_gig_list(response, GigError::BadData, "list gigs")
    }

    pub fn parse_create_gig(&self, response: HttpResponse) -> Result<Vec<Gig>, GigError> {
        let decode_error = match self.create_mode {
            CreateGigMode::Legacy => GigError::BadUrl,
            CreateGigMode::Post => GigError::BadData,
        };
        parse_gig_list(response, decode_error, "create gig")
    }
}

/// Shared status/body checks for the two routes that answer with `Gig[]`.
fn parse_gig_list(
    response: HttpResponse,
    decode_error: GigError,
    operation: &'static str,
) -> Result<Vec<Gig>, GigError> {
    if response.status != 200 {
        warn!(status = response.status, operation, "gig request received bad response");
        return Err(GigError::FailedFetch);
    }
    if response.body.is_empty() {
        warn!(operation, "gig response had no data");
        return Err(GigError::BadData);
    }
    decode(&response.body).map_err(|e| {
        warn!(error = %e, operation, "failed to decode gigs");
        decode_error
    })
}

fn json_post<T: serde::Serialize>(
    path: &str,
    payload: &T,
    mut headers: Vec<(String, String)>,
) -> Result<HttpRequest, serde_json::Error> {
    let body = serde_json::to_string_pretty(payload)?;
    headers.push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
    Ok(HttpRequest {
        method: HttpMethod::Post,
        path: path.to_string(),
        headers,
        body: Some(body),
    })
}

fn auth_header(bearer: &Bearer) -> (String, String) {
    (AUTHORIZATION.to_string(), bearer.header_value())
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(body)
}
