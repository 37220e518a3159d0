// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Harness configuration
//
// The suite is configured by a `config.json` file (camelCase keys) that is loaded
// once and passed explicitly to the session fixture and interaction layer. A few
// environment variables override the file so CI can inject URLs and credentials
// without editing it.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding `baseUrl`
pub const ENV_BASE_URL: &str = "HEALTHTEAM_BASE_URL";
/// Environment variable overriding `credentials.email`
pub const ENV_EMAIL: &str = "HEALTHTEAM_EMAIL";
/// Environment variable overriding `credentials.password`
pub const ENV_PASSWORD: &str = "HEALTHTEAM_PASSWORD";
/// Environment variable overriding `execution.environment`
pub const ENV_ENVIRONMENT: &str = "HEALTHTEAM_ENV";
/// Environment variable overriding `execution.browser`
pub const ENV_BROWSER: &str = "HEALTHTEAM_BROWSER";
/// Environment variable overriding the selected environment's `headless`
pub const ENV_HEADLESS: &str = "HEALTHTEAM_HEADLESS";

/// Browser engines Playwright can launch.
pub const SUPPORTED_ENGINES: [&str; 3] = ["chromium", "firefox", "webkit"];

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarnessConfig {
    /// Application URL every session starts from
    pub base_url: String,

    /// Login used by the UI flows
    pub credentials: Credentials,

    /// Which environment and browser to run
    pub execution: Execution,

    /// Named run profiles (local, ci, ...)
    pub environments: HashMap<String, EnvironmentConfig>,

    /// Named browser profiles
    pub available_browsers: HashMap<String, BrowserConfig>,

    /// Interaction timeouts
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Directory screenshots are written under
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Execution {
    pub environment: String,
    pub browser: String,
}

/// A run profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Per-test timeout in milliseconds
    pub timeout: u64,
    /// Extra attempts after a failed test
    #[serde(default)]
    pub retries: u32,
    #[serde(default = "default_true")]
    pub headless: bool,
    /// Worker count for the test runner. Parsed for config compatibility
    /// only; cargo's test harness decides parallelism.
    #[serde(default)]
    pub workers: Option<u32>,
    /// Informational, like `workers`.
    #[serde(default)]
    pub fully_parallel: bool,
}

impl EnvironmentConfig {
    /// Name plus description, for logs.
    pub fn label(&self) -> String {
        if self.description.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.name, self.description)
        }
    }
}

/// A browser profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserConfig {
    /// Engine name: chromium, firefox or webkit
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    /// Device descriptor name. Only logged; no emulation is applied.
    #[serde(default)]
    pub device: Option<String>,
}

impl BrowserConfig {
    /// Display name with engine and device, for logs.
    pub fn label(&self) -> String {
        let display = if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        };
        match &self.device {
            Some(device) => format!("{} ({}, {})", display, self.name, device),
            None => format!("{} ({})", display, self.name),
        }
    }
}

/// Interaction timeouts, in milliseconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeouts {
    /// Bound on the page-load wait that accompanies a click
    #[serde(default = "default_navigation_ms")]
    pub navigation_ms: u64,
    /// Default bound for `smart_wait`
    #[serde(default = "default_wait_ms")]
    pub wait_ms: u64,
}

impl Timeouts {
    pub fn navigation(&self) -> Duration {
        Duration::from_millis(self.navigation_ms)
    }

    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            navigation_ms: default_navigation_ms(),
            wait_ms: default_wait_ms(),
        }
    }
}

fn default_navigation_ms() -> u64 {
    10_000
}

fn default_wait_ms() -> u64 {
    5_000
}

fn default_true() -> bool {
    true
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from(".")
}

impl HarnessConfig {
    /// Loads `path`, applies environment overrides and validates the result.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::from(e).context(format!("reading {}", path.display())))?;
        let mut config = Self::from_json(&raw)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration JSON without overrides or validation.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Applies overrides from a variable lookup (normally `std::env::var`).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(email) = lookup(ENV_EMAIL) {
            self.credentials.email = email;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.credentials.password = password;
        }
        if let Some(environment) = lookup(ENV_ENVIRONMENT) {
            self.execution.environment = environment;
        }
        if let Some(browser) = lookup(ENV_BROWSER) {
            self.execution.browser = browser;
        }
        if let Some(headless) = lookup(ENV_HEADLESS) {
            let headless = parse_bool(&headless).ok_or_else(|| {
                Error::Config(format!("{} must be true or false, got '{}'", ENV_HEADLESS, headless))
            })?;
            let key = self.execution.environment.clone();
            if let Some(environment) = self.environments.get_mut(&key) {
                environment.headless = headless;
            }
        }
        Ok(())
    }

    /// Checks that the selected environment and browser exist.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::Config("baseUrl is empty".to_string()));
        }
        self.environment()?;
        let browser = self.browser()?;
        if !SUPPORTED_ENGINES.contains(&browser.name.as_str()) {
            return Err(Error::Config(format!(
                "Browser '{}' uses unsupported engine '{}'. Supported: {}",
                self.execution.browser,
                browser.name,
                SUPPORTED_ENGINES.join(", ")
            )));
        }
        Ok(())
    }

    /// The selected environment profile.
    pub fn environment(&self) -> Result<&EnvironmentConfig> {
        self.environments
            .get(&self.execution.environment)
            .ok_or_else(|| {
                Error::Config(format!(
                    "Environment '{}' not found. Available: {}",
                    self.execution.environment,
                    sorted_keys(&self.environments)
                ))
            })
    }

    /// The selected browser profile.
    pub fn browser(&self) -> Result<&BrowserConfig> {
        self.available_browsers
            .get(&self.execution.browser)
            .ok_or_else(|| {
                Error::Config(format!(
                    "Browser '{}' not found. Available: {}",
                    self.execution.browser,
                    sorted_keys(&self.available_browsers)
                ))
            })
    }
}

fn sorted_keys<V>(map: &HashMap<String, V>) -> String {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys.join(", ")
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
