// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Surface - the document-query and interaction primitives the harness consumes
//
// AppLibrary never talks to Playwright directly. Everything it needs from a page
// goes through this trait, which keeps the interaction layer testable against an
// in-memory page (see `testing::FakeSurface`) and lets the real implementation
// below stay a thin delegation to `playwright_rs::Page`.

use crate::dialog::{DialogResponse, DialogSlot};
use crate::error::{Error, Result};
use crate::locator::Query;
use async_trait::async_trait;
use playwright_rs::{GotoOptions, Page, WaitUntil};
use std::path::Path;
use std::time::Duration;

/// Value of `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    /// Document is still loading
    Loading,
    /// Document parsed, sub-resources still loading (`DOMContentLoaded` fired)
    Interactive,
    /// Document and sub-resources loaded (`load` fired)
    Complete,
}

impl ReadyState {
    /// Parses the string reported by `document.readyState`.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().trim_matches('"') {
            "loading" => Ok(ReadyState::Loading),
            "interactive" => Ok(ReadyState::Interactive),
            "complete" => Ok(ReadyState::Complete),
            other => Err(Error::Browser(playwright_rs::Error::ProtocolError(format!(
                "Unexpected document.readyState: {}",
                other
            )))),
        }
    }

    /// Returns true once this state satisfies the requested lifecycle state.
    pub fn reached(&self, state: LoadState) -> bool {
        match state {
            LoadState::DomContentLoaded => *self >= ReadyState::Interactive,
            LoadState::Load => *self == ReadyState::Complete,
        }
    }
}

/// Page lifecycle state to wait for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// The `DOMContentLoaded` event has fired
    DomContentLoaded,
    /// The `load` event has fired
    Load,
}

impl LoadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::DomContentLoaded => "domcontentloaded",
            LoadState::Load => "load",
        }
    }
}

/// Element-query and page primitives for one document context.
///
/// Every element method receives a resolved [`Query`]; implementations must not
/// cache element handles across calls, since the document may have navigated.
#[async_trait]
pub trait Surface: Send + Sync {
    /// Number of elements currently matching the query.
    async fn count(&self, query: &Query) -> Result<usize>;

    /// Whether the (single) matching element is attached and visible.
    ///
    /// Returns `false` when nothing matches.
    async fn is_visible(&self, query: &Query) -> Result<bool>;

    /// Visible text of the matching element.
    async fn inner_text(&self, query: &Query) -> Result<String>;

    /// Clicks the matching element.
    async fn click(&self, query: &Query) -> Result<()>;

    /// Replaces the value of the matching input with `text`.
    async fn fill(&self, query: &Query, text: &str) -> Result<()>;

    /// Scrolls the matching element into view if it is not already.
    async fn scroll_into_view(&self, query: &Query) -> Result<()>;

    /// Sets the file of a file input.
    async fn set_input_files(&self, query: &Query, path: &Path) -> Result<()>;

    /// Current `document.readyState`.
    async fn ready_state(&self) -> Result<ReadyState>;

    /// Navigates and waits until the network is idle.
    async fn goto(&self, url: &str, timeout: Duration) -> Result<()>;

    /// Writes a PNG screenshot of the page to `path`.
    async fn screenshot(&self, path: &Path) -> Result<()>;

    /// Pauses for the Playwright inspector.
    async fn pause(&self) -> Result<()>;

    /// Routes native dialogs of this page through `slot`.
    ///
    /// Called at most once per surface.
    async fn install_dialog_handler(&self, slot: DialogSlot) -> Result<()>;
}

#[async_trait]
impl Surface for Page {
    async fn count(&self, query: &Query) -> Result<usize> {
        Ok(self.locator(query.selector()).await.count().await?)
    }

    async fn is_visible(&self, query: &Query) -> Result<bool> {
        Ok(self.locator(query.selector()).await.is_visible().await?)
    }

    async fn inner_text(&self, query: &Query) -> Result<String> {
        Ok(self.locator(query.selector()).await.inner_text().await?)
    }

    async fn click(&self, query: &Query) -> Result<()> {
        Ok(self.locator(query.selector()).await.click(None).await?)
    }

    async fn fill(&self, query: &Query, text: &str) -> Result<()> {
        Ok(self.locator(query.selector()).await.fill(text, None).await?)
    }

    async fn scroll_into_view(&self, query: &Query) -> Result<()> {
        // The bindings have no standalone scroll call; hover runs Playwright's
        // scroll-into-view-if-needed step as part of its actionability checks.
        Ok(self.locator(query.selector()).await.hover(None).await?)
    }

    async fn set_input_files(&self, query: &Query, path: &Path) -> Result<()> {
        let file = path.to_path_buf();
        Ok(self
            .locator(query.selector())
            .await
            .set_input_files(&file, None)
            .await?)
    }

    async fn ready_state(&self) -> Result<ReadyState> {
        let raw = self.evaluate_value("document.readyState").await?;
        ReadyState::parse(&raw)
    }

    async fn goto(&self, url: &str, timeout: Duration) -> Result<()> {
        let options = GotoOptions::new()
            .timeout(timeout)
            .wait_until(WaitUntil::NetworkIdle);
        Page::goto(self, url, Some(options)).await?;
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        self.screenshot_to_file(path, None).await?;
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        Ok(Page::pause(self).await?)
    }

    async fn install_dialog_handler(&self, slot: DialogSlot) -> Result<()> {
        self.on_dialog(move |dialog| {
            let response = slot.take(dialog.message());
            async move {
                match response {
                    DialogResponse::Accept => dialog.accept(None).await,
                    DialogResponse::Dismiss => dialog.dismiss().await,
                }
            }
        })
        .await?;
        Ok(())
    }
}
