//! healthteam-pages: page objects for the Health Team web application
//!
//! Each page object groups the locator descriptors and workflows of one
//! screen. Page objects hold a clone of the session's
//! [`AppLibrary`](healthteam_harness::AppLibrary) and never touch the browser
//! directly, so they run unchanged against a real page or the in-memory
//! surface used in unit tests.
//!
//! # Example
//!
//! ```ignore
//! use healthteam_harness::{HarnessConfig, run_step};
//! use healthteam_pages::{DashboardPage, HeaderPage, LoginPage};
//!
//! let config = HarnessConfig::load("config.json")?;
//! let credentials = config.credentials.clone();
//! run_step(&config, "login", |app| {
//!     let credentials = credentials.clone();
//!     async move {
//!         LoginPage::new(app.clone())
//!             .login(&credentials.email, &credentials.password)
//!             .await?;
//!         DashboardPage::new(app.clone()).assert_on_dashboard().await?;
//!         HeaderPage::new(app).assert_header_visible().await
//!     }
//! })
//! .await?;
//! ```

pub mod dashboard;
pub mod header;
pub mod login;
pub mod patient_details;

pub use dashboard::DashboardPage;
pub use header::HeaderPage;
pub use login::LoginPage;
pub use patient_details::{PatientDetailsPage, PatientStatus};
