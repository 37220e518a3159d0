// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Application header (logo, title, user menu)

use healthteam_harness::{AppLibrary, Result, Surface};

pub const LOGO: &str = r#"css:-:img[alt="navimage"]"#;
pub const TITLE: &str = "text:-:Health Team";
pub const USER_PROFILE_BUTTON: &str = r#"css:-:button[aria-haspopup="menu"]"#;
pub const USER_AVATAR: &str = "css:-:img.rounded-full";
pub const USER_NAME: &str = r#"css:-:button[aria-haspopup="menu"] div:last-child"#;

/// Header shown on every authenticated screen.
pub struct HeaderPage<S> {
    app: AppLibrary<S>,
}

impl<S: Surface> HeaderPage<S> {
    pub fn new(app: AppLibrary<S>) -> Self {
        Self { app }
    }

    pub async fn assert_header_visible(&self) -> Result<()> {
        for descriptor in [LOGO, TITLE, USER_PROFILE_BUTTON] {
            self.app.assert_element_visible(descriptor).await?;
        }
        Ok(())
    }

    /// Name shown next to the avatar.
    pub async fn user_name(&self) -> Result<String> {
        self.app.find_locator(USER_NAME)?.inner_text().await
    }

    pub async fn is_avatar_present(&self) -> Result<bool> {
        self.app.is_element_present(USER_AVATAR).await
    }

    /// Opens the user menu.
    pub async fn click_user_profile(&self) -> Result<()> {
        self.app.click_in_place(USER_PROFILE_BUTTON).await
    }
}
