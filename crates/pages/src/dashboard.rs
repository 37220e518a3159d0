// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Dashboard screen - patient table, search and status filters
//
// The report-status filter is a combobox whose options render in a popover on
// the same document, so opening it and picking an option are in-place clicks.
// Applying a filter refreshes the table without any signal the page exposes,
// hence the settle delay after each selection.

use healthteam_harness::{AppLibrary, Result, Surface};
use std::time::Duration;

pub const DASHBOARD_TITLE: &str = "text:-:Dashboard";
pub const SEARCH_INPUT: &str = "placeholder:-:Search name, email";
pub const UPDATE_MISSING_FIELDS_BUTTON: &str = "text:-:Update Missing Fields";
pub const PLAN_STATUS_DROPDOWN: &str = "text:-:Plan Status";
pub const TABLE_ROW: &str = "css:-:table tbody tr";
pub const FIRST_ROW_PATIENT_NAME_LINK: &str = "css:-:table tbody tr:first-child td:first-child a";
pub const REPORT_STATUS_DROPDOWN_BUTTON: &str =
    r#"css:-:button[role="combobox"]:has(span:text-is("Report Status"))"#;
pub const REQUESTED_DROPDOWN_BUTTON: &str =
    r#"xpath:-://button[@role="combobox"]//div[contains(text(),"Requested")]"#;
pub const REPORT_STATUS_OPTION_REQUESTED: &str =
    r#"xpath:-://div[@role="option"]//div[normalize-space(text())="Requested"]"#;
pub const REPORT_STATUS_OPTION_NO_REQUESTED: &str =
    r#"xpath:-://div[@role="option"]//div[contains(.,"No Requested")]"#;
pub const REPORT_STATUS_OPTION_UPLOADED: &str =
    r#"xpath:-://div[@role="option"]//div[contains(.,"Uploaded")]"#;

/// Text of the placeholder row an empty table shows.
pub const NO_RESULTS: &str = "No results.";

/// Time given to the table to refresh after a filter selection.
pub const FILTER_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// The patient dashboard.
pub struct DashboardPage<S> {
    app: AppLibrary<S>,
    settle_delay: Duration,
}

impl<S: Surface> DashboardPage<S> {
    pub fn new(app: AppLibrary<S>) -> Self {
        Self {
            app,
            settle_delay: FILTER_SETTLE_DELAY,
        }
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub async fn assert_on_dashboard(&self) -> Result<()> {
        self.app.smart_wait(DASHBOARD_TITLE).await?;
        self.app.assert_element_visible(DASHBOARD_TITLE).await
    }

    /// Types into the search box; the table filters as you type.
    pub async fn search_user(&self, query: &str) -> Result<()> {
        self.app.enter_text(SEARCH_INPUT, query).await
    }

    pub async fn click_update_missing_fields(&self) -> Result<()> {
        self.app.click(UPDATE_MISSING_FIELDS_BUTTON).await
    }

    pub async fn open_report_status_dropdown(&self) -> Result<()> {
        self.app.click_in_place(REPORT_STATUS_DROPDOWN_BUTTON).await
    }

    pub async fn open_plan_status_dropdown(&self) -> Result<()> {
        self.app.click_in_place(PLAN_STATUS_DROPDOWN).await
    }

    /// Number of body rows, placeholder row included.
    pub async fn table_rows_count(&self) -> Result<usize> {
        self.app.find_locator(TABLE_ROW)?.count().await
    }

    /// Text of one cell, both indexes 0-based.
    pub async fn table_cell_text(&self, row: usize, cell: usize) -> Result<String> {
        self.app
            .find_locator(TABLE_ROW)?
            .nth(row)
            .locator("td")
            .nth(cell)
            .inner_text()
            .await
    }

    /// Opens the patient in the first row.
    pub async fn click_first_row_patient(&self) -> Result<()> {
        self.app.click(FIRST_ROW_PATIENT_NAME_LINK).await
    }

    pub async fn select_report_status_requested(&self) -> Result<()> {
        self.open_report_status_dropdown().await?;
        self.app
            .click_in_place(REPORT_STATUS_OPTION_REQUESTED)
            .await?;
        self.app.wait_for_timeout(self.settle_delay).await;
        Ok(())
    }

    /// Switches an active "Requested" filter to "No Requested".
    pub async fn select_report_status_no_requested(&self) -> Result<()> {
        self.app.click_in_place(REQUESTED_DROPDOWN_BUTTON).await?;
        self.app
            .click_in_place(REPORT_STATUS_OPTION_NO_REQUESTED)
            .await?;
        self.app.wait_for_timeout(self.settle_delay).await;
        Ok(())
    }

    pub async fn select_report_status_uploaded(&self) -> Result<()> {
        self.open_report_status_dropdown().await?;
        self.app
            .click_in_place(REPORT_STATUS_OPTION_UPLOADED)
            .await?;
        self.app.wait_for_timeout(self.settle_delay).await;
        Ok(())
    }

    /// Number of rows after filtering, not counting the "No results." row.
    pub async fn filtered_table_row_count(&self) -> Result<usize> {
        let mut count = 0;
        for row in self.app.find_locator(TABLE_ROW)?.all().await? {
            if !row.inner_text().await?.contains(NO_RESULTS) {
                count += 1;
            }
        }
        Ok(count)
    }
}
