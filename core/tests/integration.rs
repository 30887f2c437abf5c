//! End-to-end session test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `GigClient` with the
//! default `UreqTransport` over real HTTP. Validates that request building,
//! the transport, and response parsing agree with the server's schema.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};

use gigs_core::{ClientConfig, CreateGigMode, Gig, GigClient, GigError, User};
use mock_server::Db;

/// Serve a fresh mock store on a random local port.
async fn start_server() -> (String, Db) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let db = Db::default();
    tokio::spawn(mock_server::serve(listener, db.clone()));
    (format!("http://{addr}"), db)
}

#[tokio::test(flavor = "multi_thread")]
async fn session_lifecycle() {
    let (base_url, db) = start_server().await;
    let client = GigClient::new(ClientConfig::default().with_base_url(&base_url));
    let user = User::new("integration", "s3cret");

    // Step 1: gig routes are refused before signing in, without a request.
    assert_eq!(client.list_gigs().await, Err(GigError::NotSignedIn));

    // Step 2: sign up; the server decodes exactly what was sent.
    client.sign_up(&user).await.unwrap();
    {
        let store = db.read().await;
        let stored = store.users.get("integration").expect("user stored");
        assert_eq!(stored.username, user.username);
        assert_eq!(stored.password, user.password);
    }

    // Step 3: signing up twice is rejected by the server.
    assert_eq!(client.sign_up(&user).await, Err(GigError::SignUpFailed));

    // Step 4: wrong password keeps us signed out.
    let wrong = User::new("integration", "nope");
    assert_eq!(client.log_in(&wrong).await, Err(GigError::SignInFailed));
    assert!(!client.is_signed_in().await);

    // Step 5: log in and list an empty board.
    client.log_in(&user).await.unwrap();
    let token = client.bearer().await.unwrap().token;
    assert!(db.read().await.tokens.contains_key(&token));
    assert!(client.list_gigs().await.unwrap().is_empty());

    // Step 6: legacy create is a GET, so nothing is stored server-side.
    let gig = Gig::new("Mow lawn").with_description("front and back");
    assert!(client.create_gig(&gig).await.unwrap().is_empty());
    assert!(db.read().await.gigs.is_empty());

    // Step 7: sign out and back in.
    client.sign_out().await;
    assert_eq!(client.list_gigs().await, Err(GigError::NotSignedIn));
    client.log_in(&user).await.unwrap();
    assert_ne!(client.bearer().await.unwrap().token, token);
}

#[tokio::test(flavor = "multi_thread")]
async fn post_mode_creates_gigs() {
    let (base_url, db) = start_server().await;
    let client = GigClient::new(
        ClientConfig::default()
            .with_base_url(&base_url)
            .with_create_mode(CreateGigMode::Post),
    );
    let user = User::new("poster", "pw");
    client.sign_up(&user).await.unwrap();
    client.log_in(&user).await.unwrap();

    let gig = Gig::new("Fix sink").with_due_date("2020-04-10");
    let returned = client.create_gig(&gig).await.unwrap();
    assert_eq!(returned.len(), 1);
    assert_eq!(returned[0].title.as_deref(), Some("Fix sink"));
    assert!(returned[0].id.is_some());
    assert_eq!(db.read().await.gigs.len(), 1);

    // create leaves the cache alone until the next list
    assert!(client.gigs().await.is_empty());
    let listed = client.list_gigs().await.unwrap();
    assert_eq!(listed, returned);
    assert_eq!(client.gigs().await, listed);
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_maps_to_operation_errors() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = GigClient::new(ClientConfig::default().with_base_url(format!("http://{addr}")));
    let user = User::new("nobody", "pw");

    assert_eq!(client.sign_up(&user).await, Err(GigError::SignUpFailed));
    assert_eq!(client.log_in(&user).await, Err(GigError::SignInFailed));
    assert!(client.bearer().await.is_none());
}

/// Answer one request per connection with each canned `(status, body)` in
/// turn, then stop listening.
fn serve_raw(responses: Vec<(u16, Vec<u8>)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            read_request(&mut stream);
            let head = format!(
                "HTTP/1.1 {status} OK\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(&body).unwrap();
            stream.flush().unwrap();
        }
    });
    format!("http://{addr}")
}

/// Consume the request head and any `content-length` body.
fn read_request(stream: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "connection closed mid-request");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = String::from_utf8_lossy(&buf[..head_end]).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .map(|v| v.trim().parse::<usize>().unwrap())
        .unwrap_or(0);
    while buf.len() < head_end + content_length {
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "connection closed mid-body");
        buf.extend_from_slice(&chunk[..n]);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn non_utf8_ok_body_is_a_decode_error_not_a_transport_error() {
    let garbage = vec![b'[', 0xff, 0xfe, b']'];
    let base_url = serve_raw(vec![
        (200, garbage.clone()),
        (200, br#"{"token":"abc"}"#.to_vec()),
        (200, garbage.clone()),
        (200, garbage),
    ]);
    let client = GigClient::new(ClientConfig::default().with_base_url(base_url));
    let user = User::new("ada", "pw");

    // sign-up never looks at the body
    client.sign_up(&user).await.unwrap();
    client.log_in(&user).await.unwrap();

    assert_eq!(client.list_gigs().await, Err(GigError::BadData));
    assert_eq!(
        client.create_gig(&Gig::new("Paint")).await,
        Err(GigError::BadUrl)
    );
}
