// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Session fixture and step runner
//
// A Session owns one Playwright server, one browser and one page, already
// navigated to the application's base URL. `run_step` wraps a test body with the
// selected environment's per-test timeout and retry count: every attempt gets a
// fresh session, and a failed attempt leaves a screenshot behind before the
// session is torn down.

use crate::app::{AppLibrary, AppSettings};
use crate::config::{EnvironmentConfig, HarnessConfig};
use crate::error::{Error, Result};
use crate::wait::within;
use playwright_rs::{Browser, LaunchOptions, Page, Playwright};
use std::future::Future;
use std::time::Duration;

/// Timeout and retry budget for one test step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure
    pub retries: u32,
    /// Bound on a single attempt
    pub timeout: Duration,
}

impl RetryPolicy {
    pub fn from_environment(environment: &EnvironmentConfig) -> Self {
        Self {
            retries: environment.retries,
            timeout: Duration::from_millis(environment.timeout),
        }
    }

    /// Total number of attempts, first run included.
    pub fn attempts(&self) -> u32 {
        self.retries + 1
    }
}

/// A launched browser with one page at the application's base URL.
pub struct Session {
    playwright: Playwright,
    browser: Browser,
    app: AppLibrary<Page>,
}

impl Session {
    /// Launches the configured browser and opens `baseUrl`.
    pub async fn launch(config: &HarnessConfig) -> Result<Self> {
        let environment = config.environment()?;
        let browser_config = config.browser()?;

        tracing::info!(
            "Launching {} for environment '{}', headless={}",
            browser_config.label(),
            environment.label(),
            environment.headless
        );

        let playwright = Playwright::launch().await?;
        let browser_type = match browser_config.name.as_str() {
            "chromium" => playwright.chromium(),
            "firefox" => playwright.firefox(),
            "webkit" => playwright.webkit(),
            other => {
                return Err(Error::Config(format!(
                    "Unsupported browser engine: {}",
                    other
                )));
            }
        };

        let options = LaunchOptions::new().headless(environment.headless);
        let browser = browser_type.launch_with_options(options).await?;

        let page = match browser.new_page().await {
            Ok(page) => page,
            Err(e) => {
                discard(&playwright, &browser).await;
                return Err(e.into());
            }
        };

        let app = AppLibrary::new(page, AppSettings::from_config(config));
        if let Err(e) = app.goto(&config.base_url).await {
            discard(&playwright, &browser).await;
            return Err(e.context(format!("opening {}", config.base_url)));
        }

        Ok(Self {
            playwright,
            browser,
            app,
        })
    }

    /// Interaction layer for the session's page.
    pub fn app(&self) -> &AppLibrary<Page> {
        &self.app
    }

    /// Closes the browser and stops the Playwright server.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        self.playwright.shutdown().await?;
        Ok(())
    }
}

async fn discard(playwright: &Playwright, browser: &Browser) {
    if let Err(e) = browser.close().await {
        tracing::warn!("Failed to close browser: {}", e);
    }
    if let Err(e) = playwright.shutdown().await {
        tracing::warn!("Failed to stop Playwright server: {}", e);
    }
}

/// Runs a test body against a fresh session, honoring the selected
/// environment's timeout and retries.
///
/// # Example
///
/// ```ignore
/// run_step(&config, "login", |app| async move {
///     LoginPage::new(app).login("qa@example.test", "secret").await
/// })
/// .await?;
/// ```
pub async fn run_step<F, Fut, T>(config: &HarnessConfig, name: &str, body: F) -> Result<T>
where
    F: Fn(AppLibrary<Page>) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let policy = RetryPolicy::from_environment(config.environment()?);
    let body = &body;

    run_attempts(name, policy, move |attempt| async move {
        let session = Session::launch(config).await?;
        let app = session.app().clone();

        let what = format!("step '{}'", name);
        let outcome = within(&what, policy.timeout, body(app)).await;

        if outcome.is_err() {
            let shot = format!("{}-attempt{}", name, attempt);
            if let Err(e) = session.app().take_screenshot(&shot).await {
                tracing::warn!("Could not capture failure screenshot {}: {}", shot, e);
            }
        }

        if let Err(e) = session.close().await {
            tracing::warn!("Failed to close session after {}: {}", what, e);
        }
        outcome
    })
    .await
}

/// Calls `attempt` (with 1-based attempt numbers) until it succeeds or the
/// policy's attempts are used up.
///
/// Descriptor errors are not retried; they fail the same way every time.
pub async fn run_attempts<F, Fut, T>(name: &str, policy: RetryPolicy, mut attempt: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let total = policy.attempts();
    let mut number = 1;

    loop {
        tracing::info!("Running step '{}' (attempt {}/{})", name, number, total);
        match attempt(number).await {
            Ok(value) => return Ok(value),
            Err(e) if number < total && !e.is_descriptor_error() => {
                tracing::warn!("Step '{}' attempt {} failed: {}", name, number, e);
                number += 1;
            }
            Err(e) => {
                tracing::error!("Step '{}' failed: {}", name, e);
                return Err(Error::StepFailed {
                    step: name.to_string(),
                    attempts: number,
                    source: Box::new(e),
                });
            }
        }
    }
}
