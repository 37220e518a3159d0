//! healthteam-harness: locator descriptors and browser interaction layer for the
//! Health Team end-to-end suite
//!
//! Page objects describe elements with compact `strategy:-:value` descriptors.
//! [`AppLibrary`] resolves each descriptor to a Playwright selector and performs
//! one interaction with it: click with page-load wait, text entry, bounded waits,
//! presence and visibility checks, screenshots, scrolling and dialog handling.
//!
//! # Examples
//!
//! ## Driving a page
//!
//! ```ignore
//! use healthteam_harness::{HarnessConfig, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HarnessConfig::load("config.json")?;
//!     let session = Session::launch(&config).await?;
//!     let app = session.app();
//!
//!     app.enter_text("name:-:email", &config.credentials.email).await?;
//!     app.click("text:-:Continue").await?;
//!     app.enter_text("name:-:password", &config.credentials.password).await?;
//!     app.click("text:-:Log In").await?;
//!     app.assert_element_visible("text:-:Dashboard").await?;
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Retried steps
//!
//! ```ignore
//! use healthteam_harness::{HarnessConfig, run_step};
//!
//! let config = HarnessConfig::load("config.json")?;
//! run_step(&config, "dashboard-visible", |app| async move {
//!     app.smart_wait("text:-:Dashboard").await
//! })
//! .await?;
//! ```
//!
//! # Descriptor strategies
//!
//! | Token         | Resolves to                          |
//! |---------------|--------------------------------------|
//! | `id`          | `[id="value"]`                       |
//! | `name`        | `[name='value']`                     |
//! | `class`       | `[class~="value"]`                   |
//! | `text`        | visible text (substring, any case)   |
//! | `label`       | control labelled by the text         |
//! | `placeholder` | input placeholder                    |
//! | `alttext`     | image alt text                       |
//! | `title`       | `title` attribute                    |
//! | `testid`      | `data-testid` attribute              |
//! | `css`         | raw CSS                              |
//! | `xpath`       | raw XPath                            |
//!
//! Tokens are case-insensitive. Anything else is rejected with
//! [`Error::UnsupportedStrategy`].

pub mod app;
pub mod config;
pub mod dialog;
pub mod error;
pub mod locator;
pub mod logging;
pub mod session;
pub mod surface;
pub mod wait;

#[doc(hidden)]
pub mod testing;

pub use app::{AppLibrary, AppSettings, Element};
pub use config::HarnessConfig;
pub use dialog::{DialogResponse, DialogSubscription};
pub use error::{Error, Result};
pub use locator::{LocatorDescriptor, Query, Strategy, ToQuery, resolve};
pub use logging::init_tracing;
pub use session::{RetryPolicy, Session, run_attempts, run_step};
pub use surface::{LoadState, ReadyState, Surface};

/// Re-export of the bindings the harness drives, for callers that need raw pages.
pub use playwright_rs;
