// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// AppLibrary - descriptor-driven interaction layer used by every page object
//
// Each operation takes a locator descriptor, resolves it, and performs one
// interaction against the page's Surface. Nothing here retries: a failure ends
// the calling step and the session runner decides whether the test is retried.

use crate::config::HarnessConfig;
use crate::dialog::{DialogResponse, DialogSlot, DialogSubscription};
use crate::error::{Error, Result};
use crate::locator::{Query, ToQuery};
use crate::surface::{LoadState, Surface};
use crate::wait::{poll_until, poll_until_settled};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Default bound on the page-load wait that accompanies a click (10 seconds)
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Default bound for `smart_wait` (5 seconds)
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default bound for `goto` (30 seconds, Playwright's default)
pub const DEFAULT_GOTO_TIMEOUT: Duration = Duration::from_secs(30);

/// File name of the screenshot taken when a visibility assertion fails
pub const FAILURE_SCREENSHOT: &str = "failure.png";

/// Directory (under the artifacts dir) for named screenshots
pub const SCREENSHOT_DIR: &str = "screenshots";

/// Timeouts and artifact location for an [`AppLibrary`].
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub navigation_timeout: Duration,
    pub wait_timeout: Duration,
    pub goto_timeout: Duration,
    pub artifacts_dir: PathBuf,
}

impl AppSettings {
    pub fn new() -> Self {
        Self {
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            goto_timeout: DEFAULT_GOTO_TIMEOUT,
            artifacts_dir: PathBuf::from("."),
        }
    }

    /// Takes timeouts and the artifacts directory from the harness config.
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            navigation_timeout: config.timeouts.navigation(),
            wait_timeout: config.timeouts.wait(),
            goto_timeout: DEFAULT_GOTO_TIMEOUT,
            artifacts_dir: config.artifacts_dir.clone(),
        }
    }

    pub fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    pub fn wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    pub fn goto_timeout(mut self, timeout: Duration) -> Self {
        self.goto_timeout = timeout;
        self
    }

    pub fn artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = dir.into();
        self
    }

    /// Path of the visibility-failure screenshot.
    pub fn failure_screenshot_path(&self) -> PathBuf {
        self.artifacts_dir.join(FAILURE_SCREENSHOT)
    }

    /// Path of a named screenshot.
    pub fn screenshot_path(&self, name: &str) -> PathBuf {
        self.artifacts_dir
            .join(SCREENSHOT_DIR)
            .join(format!("{}.png", name))
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Interaction layer over one page.
///
/// Cheap to clone; clones share the page and its dialog routing.
///
/// # Example
///
/// ```ignore
/// use healthteam_harness::{AppLibrary, AppSettings};
///
/// let app = AppLibrary::new(page, AppSettings::new());
/// app.enter_text("name:-:email", "qa@example.test").await?;
/// app.click("text:-:Continue").await?;
/// app.assert_element_visible("text:-:Dashboard").await?;
/// ```
pub struct AppLibrary<S> {
    surface: Arc<S>,
    settings: AppSettings,
    dialogs: DialogSlot,
    dialog_hook: Arc<OnceCell<()>>,
}

impl<S> Clone for AppLibrary<S> {
    fn clone(&self) -> Self {
        Self {
            surface: Arc::clone(&self.surface),
            settings: self.settings.clone(),
            dialogs: self.dialogs.clone(),
            dialog_hook: Arc::clone(&self.dialog_hook),
        }
    }
}

impl<S: Surface> AppLibrary<S> {
    pub fn new(surface: S, settings: AppSettings) -> Self {
        Self::from_shared(Arc::new(surface), settings)
    }

    pub fn from_shared(surface: Arc<S>, settings: AppSettings) -> Self {
        Self {
            surface,
            settings,
            dialogs: DialogSlot::new(),
            dialog_hook: Arc::new(OnceCell::new()),
        }
    }

    /// The underlying page.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Resolves a descriptor into a lazy element handle.
    ///
    /// No browser call is made until an action runs on the handle.
    pub fn find_locator<D: ToQuery + ?Sized>(&self, descriptor: &D) -> Result<Element<'_, S>> {
        let query = descriptor.to_query()?;
        tracing::debug!("Finding element with logic: {}", query);
        Ok(Element {
            surface: self.surface.as_ref(),
            query,
        })
    }

    /// Clicks the element and waits for the page's `load` state.
    ///
    /// The click and the load wait run together and both must succeed. A click
    /// that does not navigate returns as soon as the click completes, since the
    /// page is already loaded.
    pub async fn click<D: ToQuery + ?Sized>(&self, descriptor: &D) -> Result<()> {
        let query = descriptor.to_query()?;
        tracing::info!("Clicking on {} and waiting for page to load", query);

        tokio::try_join!(
            self.surface.click(&query),
            self.wait_for_load_state(LoadState::Load, self.settings.navigation_timeout),
        )?;

        tracing::info!("Page load complete after clicking {}", query);
        Ok(())
    }

    /// Clicks the element without waiting for a page load.
    ///
    /// For clicks that only change the current document (dropdown openers,
    /// tabs, inline editors).
    pub async fn click_in_place<D: ToQuery + ?Sized>(&self, descriptor: &D) -> Result<()> {
        let query = descriptor.to_query()?;
        tracing::info!("Clicking on {}", query);
        self.surface.click(&query).await
    }

    /// Waits until the document reaches `state`.
    pub async fn wait_for_load_state(&self, state: LoadState, timeout: Duration) -> Result<()> {
        let what = format!("load state '{}'", state.as_str());
        let surface = self.surface.as_ref();
        poll_until_settled(&what, timeout, move || async move {
            surface
                .ready_state()
                .await
                .map(|ready| ready.reached(state))
        })
        .await
    }

    /// Replaces the field's content with `text`.
    ///
    /// The field is cleared first, so pre-filled or autofilled values never
    /// survive.
    pub async fn enter_text<D: ToQuery + ?Sized>(&self, descriptor: &D, text: &str) -> Result<()> {
        let query = descriptor.to_query()?;
        tracing::info!("Entering text into {}: {}", query, text);
        self.surface.fill(&query, "").await?;
        self.surface.fill(&query, text).await
    }

    /// Waits for the element to be attached and visible, with the default timeout.
    pub async fn smart_wait<D: ToQuery + ?Sized>(&self, descriptor: &D) -> Result<()> {
        self.smart_wait_for(descriptor, self.settings.wait_timeout)
            .await
    }

    /// Waits for the element to be attached and visible within `timeout`.
    pub async fn smart_wait_for<D: ToQuery + ?Sized>(
        &self,
        descriptor: &D,
        timeout: Duration,
    ) -> Result<()> {
        let query = descriptor.to_query()?;
        tracing::info!("Waiting for {} to be visible", query);
        let what = format!("{} to be visible", query);
        let surface = self.surface.as_ref();
        let query = &query;
        poll_until(&what, timeout, move || surface.is_visible(query)).await
    }

    /// Whether at least one element matches.
    ///
    /// Zero matches is `Ok(false)`, not an error.
    pub async fn is_element_present<D: ToQuery + ?Sized>(&self, descriptor: &D) -> Result<bool> {
        let query = descriptor.to_query()?;
        let count = self.surface.count(&query).await?;
        tracing::debug!("{} matches {} element(s)", query, count);
        Ok(count > 0)
    }

    /// Fails with [`Error::ElementNotVisible`] unless the element is visible.
    ///
    /// On failure a screenshot is attempted first; if that fails too, the
    /// screenshot error is logged and the visibility error is still returned.
    pub async fn assert_element_visible<D: ToQuery + ?Sized>(&self, descriptor: &D) -> Result<()> {
        let query = descriptor.to_query()?;
        if self.surface.is_visible(&query).await? {
            tracing::info!("Element {} is visible", query);
            return Ok(());
        }

        let path = self.settings.failure_screenshot_path();
        if let Err(e) = self.write_screenshot(&path).await {
            tracing::warn!(
                "Could not capture failure screenshot {}: {}",
                path.display(),
                e
            );
        }

        Err(Error::ElementNotVisible {
            descriptor: query.descriptor().to_string(),
        })
    }

    /// Saves a page screenshot as `screenshots/<name>.png` and returns its path.
    pub async fn take_screenshot(&self, name: &str) -> Result<PathBuf> {
        let path = self.settings.screenshot_path(name);
        tracing::info!("Capturing screenshot: {}", path.display());
        self.write_screenshot(&path).await?;
        Ok(path)
    }

    /// Scrolls the element into view if needed.
    pub async fn scroll_to_element<D: ToQuery + ?Sized>(&self, descriptor: &D) -> Result<()> {
        let query = descriptor.to_query()?;
        tracing::info!("Scrolling to {}", query);
        self.surface.scroll_into_view(&query).await
    }

    /// Answers the next native dialog by accepting or dismissing it.
    ///
    /// Register before the action that opens the dialog. The response applies
    /// to one dialog only and is withdrawn when the returned subscription is
    /// dropped.
    pub async fn handle_alert(&self, accept: bool) -> Result<DialogSubscription> {
        self.dialog_hook
            .get_or_try_init(|| self.surface.install_dialog_handler(self.dialogs.clone()))
            .await?;
        Ok(self.dialogs.arm(DialogResponse::from_accept(accept)))
    }

    /// Pauses for the Playwright inspector.
    pub async fn debug_pause(&self) -> Result<()> {
        tracing::info!("Pausing execution for debugging");
        self.surface.pause().await
    }

    /// Sleeps for a fixed duration.
    pub async fn wait_for_timeout(&self, duration: Duration) {
        tracing::debug!("Waiting {:?}", duration);
        tokio::time::sleep(duration).await;
    }

    /// Sets the file of a file input.
    pub async fn upload_file<D: ToQuery + ?Sized>(&self, descriptor: &D, path: &Path) -> Result<()> {
        let query = descriptor.to_query()?;
        tracing::info!("Uploading {} into {}", path.display(), query);
        self.surface.set_input_files(&query, path).await
    }

    /// Navigates to `url` and waits for network idle.
    pub async fn goto(&self, url: &str) -> Result<()> {
        tracing::info!("Navigating to {}", url);
        self.surface.goto(url, self.settings.goto_timeout).await
    }

    async fn write_screenshot(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        self.surface.screenshot(path).await
    }
}

/// Lazy handle for the elements a query matches.
#[derive(Debug)]
pub struct Element<'a, S> {
    surface: &'a S,
    query: Query,
}

impl<'a, S: Surface> Element<'a, S> {
    pub fn query(&self) -> &Query {
        &self.query
    }

    pub async fn count(&self) -> Result<usize> {
        self.surface.count(&self.query).await
    }

    pub async fn is_visible(&self) -> Result<bool> {
        self.surface.is_visible(&self.query).await
    }

    pub async fn inner_text(&self) -> Result<String> {
        self.surface.inner_text(&self.query).await
    }

    pub async fn click(&self) -> Result<()> {
        self.surface.click(&self.query).await
    }

    pub async fn fill(&self, text: &str) -> Result<()> {
        self.surface.fill(&self.query, text).await
    }

    /// Handle for the nth match (0-indexed).
    pub fn nth(&self, index: usize) -> Element<'a, S> {
        Element {
            surface: self.surface,
            query: self.query.nth(index),
        }
    }

    /// Handle for `selector` scoped to this handle's matches.
    pub fn locator(&self, selector: &str) -> Element<'a, S> {
        Element {
            surface: self.surface,
            query: self.query.locator(selector),
        }
    }

    /// One handle per current match.
    pub async fn all(&self) -> Result<Vec<Element<'a, S>>> {
        let count = self.count().await?;
        Ok((0..count).map(|index| self.nth(index)).collect())
    }
}
