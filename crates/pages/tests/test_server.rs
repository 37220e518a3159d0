// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Test Server - a miniature Health Team app for page-object tests
//
// Serves a login form, a dashboard with a filterable patient table and a patient
// details page, with just enough script to behave like the real screens.

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
            .route("/", get(login_page))
            .route("/dashboard", get(dashboard_page))
            .route("/patient", get(patient_page));

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

async fn login_page() -> Response<Body> {
    html(
        r#"<!DOCTYPE html>
<html>
<head><title>HT</title></head>
<body>
  <form onsubmit="return false">
    <input name="email" type="email" />
    <input name="password" type="password" />
    <button type="button" onclick="location.href = '/dashboard'">Continue</button>
  </form>
</body>
</html>"#,
    )
}

async fn dashboard_page() -> Response<Body> {
    html(
        r#"<!DOCTYPE html>
<html>
<head><title>HT</title></head>
<body>
  <header>
    <img alt="navimage" src="data:image/gif;base64,R0lGODlhAQABAAAAACw=" width="20" height="20" />
    <span>Health Team</span>
    <button aria-haspopup="menu"><img class="rounded-full" alt="" width="10" height="10" /><div>QA User</div></button>
  </header>
  <h1>Dashboard</h1>
  <input placeholder="Search name, email" oninput="render()" />
  <button role="combobox" onclick="toggleOptions()"><span>Report Status</span><div id="selected"></div></button>
  <div id="options" style="display: none">
    <div role="option" onclick="choose('Requested')"><div>Requested</div></div>
    <div role="option" onclick="choose('No Requested')"><div>No Requested</div></div>
    <div role="option" onclick="choose('Uploaded')"><div>Uploaded</div></div>
  </div>
  <table>
    <thead><tr><th>Name</th><th>Email</th><th>Report</th></tr></thead>
    <tbody id="rows"></tbody>
  </table>
  <script>
    const patients = [
      ["Adam Smith", "adam@example.test", "No Requested"],
      ["Sujit Rao", "sujit@example.test", "Uploaded"],
      ["Grace Hopper", "grace@example.test", "No Requested"],
    ];
    let status = "";
    function toggleOptions() {
      const options = document.getElementById("options");
      options.style.display = options.style.display === "none" ? "block" : "none";
    }
    function choose(value) {
      status = value;
      document.getElementById("selected").textContent = value;
      document.getElementById("options").style.display = "none";
      render();
    }
    function render() {
      const query = document.querySelector("input[placeholder]").value.toLowerCase();
      const matches = patients.filter(([name, email, report]) =>
        (name.toLowerCase().includes(query) || email.includes(query)) &&
        (status === "" || report === status));
      const body = document.getElementById("rows");
      body.innerHTML = matches.length === 0
        ? '<tr><td colspan="3">No results.</td></tr>'
        : matches.map(([name, email, report]) =>
            `<tr><td><a href="/patient">${name}</a></td><td>${email}</td><td>${report}</td></tr>`).join("");
    }
    render();
  </script>
</body>
</html>"#,
    )
}

async fn patient_page() -> Response<Body> {
    html(
        r#"<!DOCTYPE html>
<html>
<head><title>HT</title></head>
<body>
  <nav aria-label="breadcrumb"><a href="/dashboard">Back to list</a></nav>
  <div class="text-lg font-bold">Adam Smith</div>
  <div class="text-muted-foreground text-sm">adam@example.test</div>
  <section>
    <h2>Update status</h2>
    <button>Profile complete</button>
    <button>Test ordered</button>
    <button>Report ready</button>
    <button>Plan submitted</button>
  </section>
  <p>Reference code <span class="text-2xl font-mono font-semibold">HT-0042</span></p>
  <input type="file" />
  <div>Plan</div>
  <div class="inline-flex rounded-full">Draft</div>
</body>
</html>"#,
    )
}
