// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Shared helpers for harness integration tests

// Each test binary compiles this module separately and uses a different subset.
#![allow(dead_code)]

use healthteam_harness::testing::FakeSurface;
use healthteam_harness::{AppLibrary, AppSettings};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub fn init_tracing() {
    healthteam_harness::init_tracing();
}

/// AppLibrary over a fake page with short timeouts and artifacts under `dir`.
pub fn fake_app(surface: FakeSurface, dir: &Path) -> (Arc<FakeSurface>, AppLibrary<FakeSurface>) {
    let surface = Arc::new(surface);
    let settings = AppSettings::new()
        .navigation_timeout(Duration::from_millis(500))
        .wait_timeout(Duration::from_millis(500))
        .artifacts_dir(dir);
    let app = AppLibrary::from_shared(Arc::clone(&surface), settings);
    (surface, app)
}
