// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Login screen

use healthteam_harness::{AppLibrary, Result, Surface};

pub const EMAIL_INPUT: &str = "name:-:email";
pub const PASSWORD_INPUT: &str = "name:-:password";
pub const CONTINUE_BUTTON: &str = "text:-:Continue";

/// The sign-in form.
pub struct LoginPage<S> {
    app: AppLibrary<S>,
}

impl<S: Surface> LoginPage<S> {
    pub fn new(app: AppLibrary<S>) -> Self {
        Self { app }
    }

    /// Fills both credentials and submits.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        tracing::info!("Logging in as {}", email);
        self.app.enter_text(EMAIL_INPUT, email).await?;
        self.app.enter_text(PASSWORD_INPUT, password).await?;
        self.app.click(CONTINUE_BUTTON).await
    }
}
