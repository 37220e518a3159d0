// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Dialog subscriptions - scoped, one-shot responses to native browser dialogs
//
// Playwright keeps dialog handlers for the lifetime of the page and a page with a
// handler installed waits for that handler to answer. Instead of registering a new
// closure per test step, each page gets a single handler that consults a slot.
// `AppLibrary::handle_alert` arms the slot and hands back a subscription; the slot
// is disarmed after the first dialog it answers or when the subscription drops.

use parking_lot::Mutex;
use std::sync::Arc;

/// How to answer a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResponse {
    /// Click "OK"
    Accept,
    /// Click "Cancel" (or close an alert)
    Dismiss,
}

impl DialogResponse {
    pub fn from_accept(accept: bool) -> Self {
        if accept {
            DialogResponse::Accept
        } else {
            DialogResponse::Dismiss
        }
    }
}

#[derive(Debug, Default)]
struct SlotState {
    armed: Option<(u64, DialogResponse)>,
    next_id: u64,
    handled: u64,
}

/// Per-page dialog routing state shared between the page's dialog handler and
/// the subscriptions handed out to callers.
#[derive(Debug, Clone, Default)]
pub struct DialogSlot {
    state: Arc<Mutex<SlotState>>,
}

impl DialogSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the slot for the next dialog, replacing any earlier arming.
    pub fn arm(&self, response: DialogResponse) -> DialogSubscription {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = state.next_id;
        if state.armed.is_some() {
            tracing::debug!("Replacing pending dialog subscription");
        }
        state.armed = Some((id, response));
        DialogSubscription {
            slot: self.clone(),
            id,
        }
    }

    /// Consumes the armed response for a dialog that just opened.
    ///
    /// Unarmed dialogs are dismissed, matching Playwright's behavior for pages
    /// without listeners.
    pub fn take(&self, message: &str) -> DialogResponse {
        let mut state = self.state.lock();
        state.handled += 1;
        match state.armed.take() {
            Some((_, response)) => {
                tracing::info!("Alert detected: {} ({:?})", message, response);
                response
            }
            None => {
                tracing::warn!("Unexpected dialog dismissed: {}", message);
                DialogResponse::Dismiss
            }
        }
    }

    /// Whether a subscription is waiting for a dialog.
    pub fn is_armed(&self) -> bool {
        self.state.lock().armed.is_some()
    }

    /// Number of dialogs routed through this slot so far.
    pub fn handled_count(&self) -> u64 {
        self.state.lock().handled
    }

    fn disarm(&self, id: u64) {
        let mut state = self.state.lock();
        if matches!(state.armed, Some((armed_id, _)) if armed_id == id) {
            state.armed = None;
        }
    }

    fn is_armed_with(&self, id: u64) -> bool {
        matches!(self.state.lock().armed, Some((armed_id, _)) if armed_id == id)
    }
}

/// Handle for one armed dialog response.
///
/// Dropping the handle before a dialog arrives cancels the response.
#[derive(Debug)]
#[must_use = "dropping the subscription disarms it immediately"]
pub struct DialogSubscription {
    slot: DialogSlot,
    id: u64,
}

impl DialogSubscription {
    /// True until a dialog has consumed this subscription (or it was replaced).
    pub fn is_pending(&self) -> bool {
        self.slot.is_armed_with(self.id)
    }

    /// Disarms the subscription explicitly.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for DialogSubscription {
    fn drop(&mut self) {
        self.slot.disarm(self.id);
    }
}
