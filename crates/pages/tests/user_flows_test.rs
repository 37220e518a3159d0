// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// End-to-end user flows through the page objects
//
// Each flow runs through `run_step` against the local test server, so it
// exercises the whole stack: config, session launch, descriptors, AppLibrary
// and the page objects. Requires installed Playwright browsers; run with
// `cargo test -p healthteam-pages -- --ignored`.

mod common;
mod test_server;

use healthteam_harness::{Error, run_step};
use healthteam_pages::{DashboardPage, HeaderPage, LoginPage, PatientDetailsPage};
use std::time::Duration;
use test_server::TestServer;

#[tokio::test]
#[ignore = "requires Playwright browsers"]
async fn test_successful_login() -> anyhow::Result<()> {
    common::init_tracing();
    let server = TestServer::start().await;
    let dir = tempfile::tempdir()?;
    let config = common::config_for(&server.url(), dir.path());
    let credentials = &config.credentials;

    let user = run_step(&config, "successful-login", move |app| async move {
        LoginPage::new(app.clone())
            .login(&credentials.email, &credentials.password)
            .await?;
        DashboardPage::new(app.clone()).assert_on_dashboard().await?;
        let header = HeaderPage::new(app);
        header.assert_header_visible().await?;
        header.user_name().await
    })
    .await?;

    assert_eq!(user, "QA User");
    server.shutdown();
    Ok(())
}

#[tokio::test]
#[ignore = "requires Playwright browsers"]
async fn test_dashboard_search() -> anyhow::Result<()> {
    common::init_tracing();
    let server = TestServer::start().await;
    let dir = tempfile::tempdir()?;
    let config = common::config_for(&server.url(), dir.path());
    let credentials = &config.credentials;

    let found = run_step(&config, "dashboard-search", move |app| async move {
        LoginPage::new(app.clone())
            .login(&credentials.email, &credentials.password)
            .await?;
        let dashboard = DashboardPage::new(app);
        dashboard.assert_on_dashboard().await?;
        dashboard.search_user("Sujit").await?;

        let rows = dashboard.table_rows_count().await?;
        for row in 0..rows {
            if dashboard.table_cell_text(row, 1).await?.to_lowercase().contains("sujit") {
                return Ok::<_, Error>(true);
            }
        }
        Ok::<_, Error>(false)
    })
    .await?;

    assert!(found);
    server.shutdown();
    Ok(())
}

#[tokio::test]
#[ignore = "requires Playwright browsers"]
async fn test_report_status_filter() -> anyhow::Result<()> {
    common::init_tracing();
    let server = TestServer::start().await;
    let dir = tempfile::tempdir()?;
    let config = common::config_for(&server.url(), dir.path());
    let credentials = &config.credentials;

    let (requested, no_requested) = run_step(&config, "report-status-filter", move |app| async move {
        LoginPage::new(app.clone())
            .login(&credentials.email, &credentials.password)
            .await?;
        let dashboard = DashboardPage::new(app).with_settle_delay(Duration::from_millis(200));
        dashboard.assert_on_dashboard().await?;

        dashboard.select_report_status_requested().await?;
        let requested = dashboard.filtered_table_row_count().await?;

        dashboard.select_report_status_no_requested().await?;
        let no_requested = dashboard.filtered_table_row_count().await?;
        Ok::<_, Error>((requested, no_requested))
    })
    .await?;

    assert_eq!(requested, 0);
    assert!(no_requested > 0);
    server.shutdown();
    Ok(())
}

#[tokio::test]
#[ignore = "requires Playwright browsers"]
async fn test_patient_details_and_back() -> anyhow::Result<()> {
    common::init_tracing();
    let server = TestServer::start().await;
    let dir = tempfile::tempdir()?;
    let config = common::config_for(&server.url(), dir.path());
    let credentials = &config.credentials;

    let (name, email) = run_step(&config, "patient-details", move |app| async move {
        LoginPage::new(app.clone())
            .login(&credentials.email, &credentials.password)
            .await?;
        let dashboard = DashboardPage::new(app.clone());
        dashboard.assert_on_dashboard().await?;
        dashboard.search_user("Adam").await?;
        dashboard.click_first_row_patient().await?;

        let details = PatientDetailsPage::new(app);
        details.assert_patient_details_visible().await?;
        let name = details.patient_name().await?;
        let email = details.patient_email().await?;
        details.assert_plan_section_visible().await?;

        details.click_dashboard_breadcrumb().await?;
        dashboard.assert_on_dashboard().await?;
        Ok::<_, Error>((name, email))
    })
    .await?;

    assert!(name.contains("Adam"));
    assert!(email.contains('@'));
    server.shutdown();
    Ok(())
}

#[tokio::test]
#[ignore = "requires Playwright browsers"]
async fn test_failed_step_leaves_screenshot() -> anyhow::Result<()> {
    common::init_tracing();
    let server = TestServer::start().await;
    let dir = tempfile::tempdir()?;
    let config = common::config_for(&server.url(), dir.path());

    let result = run_step(&config, "missing-dashboard", |app| async move {
        DashboardPage::new(app).assert_on_dashboard().await
    })
    .await;

    assert!(result.is_err());
    assert!(
        dir.path()
            .join("screenshots")
            .join("missing-dashboard-attempt1.png")
            .exists()
    );
    server.shutdown();
    Ok(())
}
