//! In-memory stand-in for the gigs API.
//!
//! Serves the four routes the client uses, plus `POST /gigs` for the
//! corrected create path. Tokens are random v4 uuids that live as long as the
//! process.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bearer {
    pub token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Gig {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "dueDate", default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Default)]
pub struct Store {
    pub users: HashMap<String, User>,
    /// token -> username
    pub tokens: HashMap<String, String>,
    pub gigs: Vec<Gig>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with_db(Db::default())
}

pub fn app_with_db(db: Db) -> Router {
    Router::new()
        .route("/users/signup", post(sign_up))
        .route("/users/login", post(log_in))
        .route("/gigs/", get(list_gigs))
        .route("/gigs", get(list_gigs).post(create_gig))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, Db::default()).await
}

/// Like `run`, but over a store the caller can inspect.
pub async fn serve(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_db(db)).await
}

async fn sign_up(State(db): State<Db>, Json(user): Json<User>) -> StatusCode {
    if user.username.is_empty() || user.password.is_empty() {
        return StatusCode::BAD_REQUEST;
    }
    let mut store = db.write().await;
    if store.users.contains_key(&user.username) {
        warn!(username = %user.username, "username already taken");
        return StatusCode::CONFLICT;
    }
    info!(username = %user.username, "user signed up");
    store.users.insert(user.username.clone(), user);
    StatusCode::OK
}

async fn log_in(
    State(db): State<Db>,
    Json(user): Json<User>,
) -> Result<Json<Bearer>, StatusCode> {
    let mut store = db.write().await;
    match store.users.get(&user.username) {
        Some(known) if known.password == user.password => {}
        _ => {
            warn!(username = %user.username, "rejected credentials");
            return Err(StatusCode::UNAUTHORIZED);
        }
    }
    let token = Uuid::new_v4().to_string();
    store.tokens.insert(token.clone(), user.username);
    Ok(Json(Bearer { token }))
}

async fn list_gigs(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Vec<Gig>>, StatusCode> {
    let store = db.read().await;
    authorize(&store, &headers)?;
    Ok(Json(store.gigs.clone()))
}

async fn create_gig(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(mut gig): Json<Gig>,
) -> Result<Json<Vec<Gig>>, StatusCode> {
    let mut store = db.write().await;
    authorize(&store, &headers)?;
    if gig.id.is_empty() {
        gig.id = Uuid::new_v4().to_string();
    }
    info!(id = %gig.id, title = %gig.title, "gig created");
    store.gigs.push(gig);
    Ok(Json(store.gigs.clone()))
}

/// Resolve the `Authorization: Bearer <token>` header to a username.
fn authorize<'a>(store: &'a Store, headers: &HeaderMap) -> Result<&'a str, StatusCode> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|token| store.tokens.get(token))
        .map(String::as_str)
        .ok_or(StatusCode::UNAUTHORIZED)
}
