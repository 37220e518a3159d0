// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Shared helpers for page-object integration tests

// Each test binary compiles this module separately and uses a different subset.
#![allow(dead_code)]

use healthteam_harness::HarnessConfig;
use std::path::Path;

pub fn init_tracing() {
    healthteam_harness::init_tracing();
}

/// Config pointing a headless Chromium session at `base_url`.
pub fn config_for(base_url: &str, artifacts: &Path) -> HarnessConfig {
    let raw = serde_json::json!({
        "baseUrl": base_url,
        "credentials": { "email": "qa@example.test", "password": "secret" },
        "execution": { "environment": "test", "browser": "chrome" },
        "environments": {
            "test": { "name": "Test", "timeout": 60000, "retries": 0, "headless": true }
        },
        "availableBrowsers": {
            "chrome": { "name": "chromium", "displayName": "Chromium" }
        }
    });
    let mut config = HarnessConfig::from_json(&raw.to_string()).expect("fixture config parses");
    config.artifacts_dir = artifacts.to_path_buf();
    config.validate().expect("fixture config is valid");
    config
}
