// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Patient details screen

use healthteam_harness::{AppLibrary, Result, Surface};
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const PATIENT_NAME: &str = "css:-:div.text-lg.font-bold";
pub const PATIENT_EMAIL: &str = r#"xpath:-://div[@class="text-muted-foreground text-sm"]"#;
pub const UPDATE_STATUS_SECTION: &str = "text:-:Update status";
pub const PROFILE_COMPLETE_BUTTON: &str = "text:-:Profile complete";
pub const TEST_ORDERED_BUTTON: &str = "text:-:Test ordered";
pub const REPORT_READY_BUTTON: &str = "text:-:Report ready";
pub const PLAN_SUBMITTED_BUTTON: &str = "text:-:Plan submitted";
pub const REFERENCE_VALUE: &str = "css:-:span.text-2xl.font-mono.font-semibold";
pub const EDIT_REFERENCE_BUTTON: &str = "text:-:Edit";
pub const REPORT_FILE_INPUT: &str = r#"css:-:input[type="file"]"#;
pub const REVIEW_AND_SUBMIT_BUTTON: &str = "text:-:Review and Submit";
pub const PLAN_SECTION: &str = r#"xpath:-://div[text()="Plan"]"#;
pub const PLAN_STATUS: &str =
    r#"xpath:-://div[contains(@class, "inline-flex") and contains(@class, "rounded-full")]"#;
pub const EDIT_PROFILE_BUTTON: &str = "text:-:Edit Profile";
pub const DASHBOARD_BREADCRUMB: &str =
    r#"css:-:nav[aria-label="breadcrumb"] a[href="/dashboard"]"#;

/// How long the details screen may take to render after opening a patient.
pub const DETAILS_LOAD_TIMEOUT: Duration = Duration::from_secs(4);

/// Steps of a patient's care workflow, as offered by the status buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientStatus {
    ProfileComplete,
    TestOrdered,
    ReportReady,
    PlanSubmitted,
}

impl PatientStatus {
    pub const ALL: [PatientStatus; 4] = [
        PatientStatus::ProfileComplete,
        PatientStatus::TestOrdered,
        PatientStatus::ReportReady,
        PatientStatus::PlanSubmitted,
    ];

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            PatientStatus::ProfileComplete => "Profile complete",
            PatientStatus::TestOrdered => "Test ordered",
            PatientStatus::ReportReady => "Report ready",
            PatientStatus::PlanSubmitted => "Plan submitted",
        }
    }

    pub fn descriptor(&self) -> &'static str {
        match self {
            PatientStatus::ProfileComplete => PROFILE_COMPLETE_BUTTON,
            PatientStatus::TestOrdered => TEST_ORDERED_BUTTON,
            PatientStatus::ReportReady => REPORT_READY_BUTTON,
            PatientStatus::PlanSubmitted => PLAN_SUBMITTED_BUTTON,
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One patient's record.
pub struct PatientDetailsPage<S> {
    app: AppLibrary<S>,
    load_timeout: Duration,
}

impl<S: Surface> PatientDetailsPage<S> {
    pub fn new(app: AppLibrary<S>) -> Self {
        Self {
            app,
            load_timeout: DETAILS_LOAD_TIMEOUT,
        }
    }

    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// Waits for the record to render, then checks name, email and the
    /// status section.
    pub async fn assert_patient_details_visible(&self) -> Result<()> {
        self.app
            .smart_wait_for(PATIENT_NAME, self.load_timeout)
            .await?;
        for descriptor in [PATIENT_NAME, PATIENT_EMAIL, UPDATE_STATUS_SECTION] {
            self.app.assert_element_visible(descriptor).await?;
        }
        Ok(())
    }

    pub async fn patient_name(&self) -> Result<String> {
        self.app.find_locator(PATIENT_NAME)?.inner_text().await
    }

    pub async fn patient_email(&self) -> Result<String> {
        self.app.find_locator(PATIENT_EMAIL)?.inner_text().await
    }

    pub async fn click_status_button(&self, status: PatientStatus) -> Result<()> {
        tracing::info!("Setting patient status to {}", status);
        self.app.click(status.descriptor()).await
    }

    pub async fn reference_code(&self) -> Result<String> {
        self.app.find_locator(REFERENCE_VALUE)?.inner_text().await
    }

    pub async fn click_edit_reference(&self) -> Result<()> {
        self.app.click(EDIT_REFERENCE_BUTTON).await
    }

    /// Attaches a report file to the upload input.
    pub async fn upload_report(&self, path: &Path) -> Result<()> {
        self.app.upload_file(REPORT_FILE_INPUT, path).await
    }

    pub async fn click_review_and_submit(&self) -> Result<()> {
        self.app.click(REVIEW_AND_SUBMIT_BUTTON).await
    }

    pub async fn assert_plan_section_visible(&self) -> Result<()> {
        self.app.assert_element_visible(PLAN_SECTION).await?;
        self.app.assert_element_visible(PLAN_STATUS).await
    }

    pub async fn click_edit_profile(&self) -> Result<()> {
        self.app.click(EDIT_PROFILE_BUTTON).await
    }

    /// Returns to the dashboard through the breadcrumb.
    pub async fn click_dashboard_breadcrumb(&self) -> Result<()> {
        self.app.click(DASHBOARD_BREADCRUMB).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fake_app, selector};
    use healthteam_harness::Error;
    use healthteam_harness::testing::{Action, FakeElement, FakeSurface};
    use std::path::PathBuf;

    fn record() -> FakeSurface {
        FakeSurface::new()
            .with_element(selector(PATIENT_NAME), FakeElement::visible("Adam Smith"))
            .with_element(selector(PATIENT_EMAIL), FakeElement::visible("adam@example.test"))
            .with_element(selector(UPDATE_STATUS_SECTION), FakeElement::visible("Update status"))
            .with_element(selector(REFERENCE_VALUE), FakeElement::visible("HT-0042"))
            .with_element(selector(PLAN_SECTION), FakeElement::visible("Plan"))
            .with_element(selector(PLAN_STATUS), FakeElement::visible("Draft"))
    }

    #[tokio::test]
    async fn test_details_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let (_surface, app) = fake_app(record(), dir.path());
        let details = PatientDetailsPage::new(app);

        details.assert_patient_details_visible().await.unwrap();
        assert!(details.patient_name().await.unwrap().contains("Adam"));
        assert!(details.patient_email().await.unwrap().contains('@'));
        assert_eq!(details.reference_code().await.unwrap(), "HT-0042");
        details.assert_plan_section_visible().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_record_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let (_surface, app) = fake_app(FakeSurface::new(), dir.path());
        let details = PatientDetailsPage::new(app).with_load_timeout(Duration::from_millis(200));

        let err = details.assert_patient_details_visible().await.unwrap_err();
        assert!(matches!(err, Error::WaitTimeout { timeout_ms: 200, .. }));
    }

    #[tokio::test]
    async fn test_status_buttons_map_to_descriptors() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = FakeSurface::new();
        for status in PatientStatus::ALL {
            surface = surface.with_element(selector(status.descriptor()), FakeElement::visible(status.label()));
        }
        let (surface, app) = fake_app(surface, dir.path());
        let details = PatientDetailsPage::new(app);

        for status in PatientStatus::ALL {
            details.click_status_button(status).await.unwrap();
        }

        let clicked: Vec<Action> = PatientStatus::ALL
            .iter()
            .map(|status| Action::Click(selector(status.descriptor())))
            .collect();
        assert_eq!(surface.actions(), clicked);
        assert_eq!(PatientStatus::ReportReady.to_string(), "Report ready");
    }

    #[tokio::test]
    async fn test_upload_report_and_navigation() {
        let dir = tempfile::tempdir().unwrap();
        let surface = record()
            .with_element(selector(REPORT_FILE_INPUT), FakeElement::input(""))
            .with_element(selector(DASHBOARD_BREADCRUMB), FakeElement::visible("Dashboard"));
        let (surface, app) = fake_app(surface, dir.path());
        let details = PatientDetailsPage::new(app);

        details
            .upload_report(&PathBuf::from("report.pdf"))
            .await
            .unwrap();
        details.click_dashboard_breadcrumb().await.unwrap();

        assert_eq!(
            surface.actions(),
            vec![
                Action::SetInputFiles(selector(REPORT_FILE_INPUT), PathBuf::from("report.pdf")),
                Action::Click(selector(DASHBOARD_BREADCRUMB)),
            ]
        );
        assert!(details.click_edit_profile().await.is_err());
    }
}
