// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Test Server - local HTTP server with fixture pages for browser-backed tests

// Each test binary compiles this module separately.
#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Response, StatusCode},
    routing::get,
};
use std::net::SocketAddr;
use tokio::task::JoinHandle;

/// Test server handle
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start the test server on a random available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/", get(dashboard_page))
            .route("/form.html", get(form_page))
            .route("/next.html", get(next_page))
            .route("/dialog.html", get(dialog_page));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");

        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server failed");
        });

        TestServer { addr, handle }
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Shutdown the test server
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

fn html(body: &'static str) -> Response<Body> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html")
        .body(Body::from(body))
        .unwrap()
}

async fn dashboard_page() -> Response<Body> {
    html(
        r#"<!DOCTYPE html>
<html>
<head><title>Dashboard</title></head>
<body>
  <h1>Dashboard</h1>
  <p id="hidden-banner" style="display: none">Saved</p>
  <table>
    <thead><tr><th>Name</th><th>Email</th></tr></thead>
    <tbody>
      <tr><td>Ada Lovelace</td><td>ada@example.test</td></tr>
      <tr><td>Grace Hopper</td><td>grace@example.test</td></tr>
      <tr><td>Alan Turing</td><td>alan@example.test</td></tr>
    </tbody>
  </table>
  <a id="next-link" href="/next.html">Next page</a>
  <div style="height: 3000px"></div>
  <footer data-testid="footer">Footer</footer>
</body>
</html>"#,
    )
}

async fn form_page() -> Response<Body> {
    html(
        r#"<!DOCTYPE html>
<html>
<head><title>Form</title></head>
<body>
  <form>
    <label for="email">Email address</label>
    <input id="email" name="email" value="old" />
    <input name="search" placeholder="Search name, email" />
    <img alt="navimage" src="data:image/gif;base64,R0lGODlhAQABAAAAACw=" />
    <button type="button" title="Close">x</button>
  </form>
</body>
</html>"#,
    )
}

async fn next_page() -> Response<Body> {
    html(
        r#"<!DOCTYPE html>
<html>
<head><title>Next</title></head>
<body>
  <h1>Patient Details</h1>
</body>
</html>"#,
    )
}

async fn dialog_page() -> Response<Body> {
    html(
        r#"<!DOCTYPE html>
<html>
<head><title>Dialogs</title></head>
<body>
  <button id="delete" onclick="document.getElementById('result').textContent = confirm('Delete patient?') ? 'accepted' : 'dismissed'">Delete</button>
  <div id="result"></div>
</body>
</html>"#,
    )
}
