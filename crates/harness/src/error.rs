// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Error types for the harness

use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving locators or driving a page
#[derive(Debug, Error)]
pub enum Error {
    /// Descriptor names a strategy outside the supported set
    ///
    /// Supported strategies: id, name, class, text, label, placeholder,
    /// alttext, title, testid, css, xpath.
    #[error("Invalid locator strategy: {0}")]
    UnsupportedStrategy(String),

    /// Descriptor has a strategy but nothing after the separator
    #[error("Locator value is empty for strategy '{0}'")]
    EmptyLocatorValue(String),

    /// Descriptor does not contain the `:-:` separator at all
    #[error("Malformed locator descriptor '{0}': expected 'strategy:-:value'")]
    MalformedDescriptor(String),

    /// An awaited condition did not occur within its bound
    #[error("Timed out after {timeout_ms}ms waiting for {what}")]
    WaitTimeout { what: String, timeout_ms: u64 },

    /// Visibility assertion failed
    ///
    /// A diagnostic screenshot is attempted before this error is returned.
    #[error("Element {descriptor} is NOT visible")]
    ElementNotVisible { descriptor: String },

    /// Interaction required an element but none matched
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Error reported by the underlying Playwright bindings
    #[error("Browser error: {0}")]
    Browser(#[from] playwright_rs::Error),

    /// I/O error (screenshots, config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration is inconsistent (unknown environment, unknown browser, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A test step failed on every attempt the retry policy allowed
    #[error("Step '{step}' failed after {attempts} attempt(s): {source}")]
    StepFailed {
        step: String,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Returns true for errors caused by a bad descriptor rather than page state
    pub fn is_descriptor_error(&self) -> bool {
        match self {
            Error::UnsupportedStrategy(_)
            | Error::EmptyLocatorValue(_)
            | Error::MalformedDescriptor(_) => true,
            Error::Context(_, inner) => inner.is_descriptor_error(),
            _ => false,
        }
    }
}
