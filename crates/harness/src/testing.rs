// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// In-memory Surface for tests
//
// FakeSurface stands in for a browser page. Elements are registered under the
// exact selector string a query resolves to; a trailing `>> nth=N` picks one
// element from the list registered for the rest of the selector. Every
// interaction is recorded so tests can assert on ordering.

use crate::dialog::{DialogResponse, DialogSlot};
use crate::error::{Error, Result};
use crate::locator::Query;
use crate::surface::{ReadyState, Surface};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One element of the fake document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeElement {
    pub text: String,
    pub value: String,
    pub visible: bool,
}

impl FakeElement {
    /// A visible element with the given text.
    pub fn visible(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: String::new(),
            visible: true,
        }
    }

    /// An attached but hidden element.
    pub fn hidden(text: impl Into<String>) -> Self {
        Self {
            visible: false,
            ..Self::visible(text)
        }
    }

    /// A visible input holding `value`.
    pub fn input(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::visible("")
        }
    }
}

/// Interaction recorded by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Click(String),
    Fill(String, String),
    Scroll(String),
    SetInputFiles(String, PathBuf),
    Goto(String),
    Screenshot(PathBuf),
    Pause,
}

#[derive(Debug)]
struct FakeState {
    elements: HashMap<String, Vec<FakeElement>>,
    ready_states: VecDeque<ReadyState>,
    actions: Vec<Action>,
    click_effects: HashMap<String, ClickEffect>,
    dialog_slot: Option<DialogSlot>,
    dialog_installs: usize,
    fail_screenshots: bool,
    click_delay: Duration,
}

#[derive(Debug, Clone)]
enum ClickEffect {
    Navigate(Vec<ReadyState>),
    Reveal(String, Vec<FakeElement>),
}

/// In-memory page.
#[derive(Debug)]
pub struct FakeSurface {
    state: Mutex<FakeState>,
}

impl Default for FakeSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSurface {
    /// An empty, fully loaded document.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                elements: HashMap::new(),
                ready_states: VecDeque::from([ReadyState::Complete]),
                actions: Vec::new(),
                click_effects: HashMap::new(),
                dialog_slot: None,
                dialog_installs: 0,
                fail_screenshots: false,
                click_delay: Duration::ZERO,
            }),
        }
    }

    /// Registers elements under a selector, replacing earlier ones.
    pub fn with_elements(
        self,
        selector: impl Into<String>,
        elements: impl IntoIterator<Item = FakeElement>,
    ) -> Self {
        self.set_elements(selector, elements);
        self
    }

    /// Registers a single element under a selector.
    pub fn with_element(self, selector: impl Into<String>, element: FakeElement) -> Self {
        self.with_elements(selector, [element])
    }

    pub fn set_elements(
        &self,
        selector: impl Into<String>,
        elements: impl IntoIterator<Item = FakeElement>,
    ) {
        self.state
            .lock()
            .elements
            .insert(selector.into(), elements.into_iter().collect());
    }

    /// Removes every element registered under a selector.
    pub fn remove_elements(&self, selector: &str) {
        self.state.lock().elements.remove(selector);
    }

    /// Scripts the values `document.readyState` reports, one per poll.
    ///
    /// The last value sticks once the script runs out.
    pub fn script_ready_states(&self, states: impl IntoIterator<Item = ReadyState>) {
        let mut script: VecDeque<ReadyState> = states.into_iter().collect();
        if script.is_empty() {
            script.push_back(ReadyState::Complete);
        }
        self.state.lock().ready_states = script;
    }

    /// Clicking `selector` starts a navigation that walks through `states`.
    pub fn navigates_on_click(
        self,
        selector: impl Into<String>,
        states: impl IntoIterator<Item = ReadyState>,
    ) -> Self {
        self.state.lock().click_effects.insert(
            selector.into(),
            ClickEffect::Navigate(states.into_iter().collect()),
        );
        self
    }

    /// Clicking `selector` makes `elements` appear under `revealed`.
    pub fn reveals_on_click(
        self,
        selector: impl Into<String>,
        revealed: impl Into<String>,
        elements: impl IntoIterator<Item = FakeElement>,
    ) -> Self {
        self.state.lock().click_effects.insert(
            selector.into(),
            ClickEffect::Reveal(revealed.into(), elements.into_iter().collect()),
        );
        self
    }

    /// Delays every click by `delay`.
    pub fn with_click_delay(self, delay: Duration) -> Self {
        self.state.lock().click_delay = delay;
        self
    }

    /// Makes every screenshot fail.
    pub fn failing_screenshots(self) -> Self {
        self.state.lock().fail_screenshots = true;
        self
    }

    /// Interactions performed so far.
    pub fn actions(&self) -> Vec<Action> {
        self.state.lock().actions.clone()
    }

    /// Current value of the first element matching `selector`.
    pub fn value_of(&self, selector: &str) -> Option<String> {
        let state = self.state.lock();
        lookup(&state.elements, selector)
            .into_iter()
            .next()
            .map(|element| element.value)
    }

    /// Opens a native dialog; returns how the page's handler answered it, or
    /// `None` when no handler is installed.
    pub fn trigger_dialog(&self, message: &str) -> Option<DialogResponse> {
        let slot = self.state.lock().dialog_slot.clone();
        slot.map(|slot| slot.take(message))
    }

    /// How many times a dialog handler was installed.
    pub fn dialog_installs(&self) -> usize {
        self.state.lock().dialog_installs
    }

    fn record(&self, action: Action) {
        self.state.lock().actions.push(action);
    }

    fn single(&self, query: &Query) -> Result<FakeElement> {
        let state = self.state.lock();
        let mut matches = lookup(&state.elements, query.selector());
        match matches.len() {
            0 => Err(Error::ElementNotFound(query.descriptor().to_string())),
            1 => Ok(matches.remove(0)),
            n => Err(Error::Browser(playwright_rs::Error::ProtocolError(format!(
                "strict mode violation: {} resolved to {} elements",
                query.selector(),
                n
            )))),
        }
    }
}

// Exact key first, then `<base> >> nth=N` against the elements of `<base>`.
fn lookup(elements: &HashMap<String, Vec<FakeElement>>, selector: &str) -> Vec<FakeElement> {
    if let Some(found) = elements.get(selector) {
        return found.clone();
    }
    if let Some((base, index)) = selector.rsplit_once(" >> nth=") {
        if let Ok(index) = index.trim().parse::<usize>() {
            return lookup(elements, base)
                .into_iter()
                .nth(index)
                .into_iter()
                .collect();
        }
    }
    Vec::new()
}

fn update_first(state: &mut FakeState, selector: &str, f: impl FnOnce(&mut FakeElement)) -> bool {
    if let Some(element) = state
        .elements
        .get_mut(selector)
        .and_then(|list| list.first_mut())
    {
        f(element);
        return true;
    }
    if let Some((base, index)) = selector.rsplit_once(" >> nth=") {
        if let Ok(index) = index.trim().parse::<usize>() {
            if let Some(element) = state
                .elements
                .get_mut(base)
                .and_then(|list| list.get_mut(index))
            {
                f(element);
                return true;
            }
        }
    }
    false
}

#[async_trait]
impl Surface for FakeSurface {
    async fn count(&self, query: &Query) -> Result<usize> {
        Ok(lookup(&self.state.lock().elements, query.selector()).len())
    }

    async fn is_visible(&self, query: &Query) -> Result<bool> {
        let state = self.state.lock();
        Ok(lookup(&state.elements, query.selector())
            .first()
            .is_some_and(|element| element.visible))
    }

    async fn inner_text(&self, query: &Query) -> Result<String> {
        Ok(self.single(query)?.text)
    }

    async fn click(&self, query: &Query) -> Result<()> {
        let element = self.single(query)?;
        if !element.visible {
            return Err(Error::WaitTimeout {
                what: format!("{} to be visible for click", query),
                timeout_ms: 0,
            });
        }

        let delay = self.state.lock().click_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock();
        state.actions.push(Action::Click(query.selector().to_string()));
        match state.click_effects.get(query.selector()).cloned() {
            Some(ClickEffect::Navigate(states)) => {
                state.ready_states = states.into_iter().collect();
                if state.ready_states.is_empty() {
                    state.ready_states.push_back(ReadyState::Complete);
                }
            }
            Some(ClickEffect::Reveal(selector, elements)) => {
                state.elements.insert(selector, elements);
            }
            None => {}
        }
        Ok(())
    }

    async fn fill(&self, query: &Query, text: &str) -> Result<()> {
        self.single(query)?;
        let mut state = self.state.lock();
        update_first(&mut state, query.selector(), |element| {
            element.value = text.to_string();
        });
        state
            .actions
            .push(Action::Fill(query.selector().to_string(), text.to_string()));
        Ok(())
    }

    async fn scroll_into_view(&self, query: &Query) -> Result<()> {
        self.single(query)?;
        self.record(Action::Scroll(query.selector().to_string()));
        Ok(())
    }

    async fn set_input_files(&self, query: &Query, path: &Path) -> Result<()> {
        self.single(query)?;
        self.record(Action::SetInputFiles(
            query.selector().to_string(),
            path.to_path_buf(),
        ));
        Ok(())
    }

    async fn ready_state(&self) -> Result<ReadyState> {
        let mut state = self.state.lock();
        let current = if state.ready_states.len() > 1 {
            state.ready_states.pop_front()
        } else {
            state.ready_states.front().copied()
        };
        Ok(current.unwrap_or(ReadyState::Complete))
    }

    async fn goto(&self, url: &str, _timeout: Duration) -> Result<()> {
        self.record(Action::Goto(url.to_string()));
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        let fail = self.state.lock().fail_screenshots;
        if fail {
            return Err(Error::Io(std::io::Error::other("screenshot capture failed")));
        }
        tokio::fs::write(path, b"\x89PNG\r\n\x1a\n").await?;
        self.record(Action::Screenshot(path.to_path_buf()));
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        self.record(Action::Pause);
        Ok(())
    }

    async fn install_dialog_handler(&self, slot: DialogSlot) -> Result<()> {
        let mut state = self.state.lock();
        state.dialog_slot = Some(slot);
        state.dialog_installs += 1;
        Ok(())
    }
}
