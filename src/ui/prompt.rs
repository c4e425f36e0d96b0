//! Interactive prompts built on inquire.

use std::path::Path;

use anyhow::{Context, Result};
use cryptkit::Secret;
use inquire::{Confirm, Password, PasswordDisplayMode, min_length, required};

pub struct Prompt {
    password_min_length: usize,
}

impl Prompt {
    pub fn new(password_min_length: usize) -> Self {
        Self { password_min_length }
    }

    /// Masked password entry followed by a confirmation entry.
    pub fn prompt_encryption_password(&self) -> Result<Secret> {
        let password = Password::new("Enter encryption password")
            .with_display_mode(PasswordDisplayMode::Masked)
            .with_validator(required!("password cannot be empty"))
            .with_validator(min_length!(self.password_min_length, "password is too short"))
            .with_custom_confirmation_message("Confirm password")
            .with_custom_confirmation_error_message("passwords do not match")
            .prompt()
            .context("password input failed")?;

        Ok(Secret::from_string(password))
    }

    pub fn prompt_decryption_password(&self) -> Result<Secret> {
        let password = Password::new("Enter decryption password")
            .with_display_mode(PasswordDisplayMode::Masked)
            .with_validator(required!("password cannot be empty"))
            .without_confirmation()
            .prompt()
            .context("password input failed")?;

        Ok(Secret::from_string(password))
    }

    /// Asks for a password to evaluate. No confirmation, no length rule.
    pub fn prompt_password_to_check() -> Result<Secret> {
        let password = Password::new("Password to evaluate")
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()
            .context("password input failed")?;

        Ok(Secret::from_string(password))
    }

    pub fn confirm_file_overwrite(path: &Path) -> Result<bool> {
        let filename = path.file_name().map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        Confirm::new(&format!("Output file {filename} already exists. Overwrite?"))
            .with_default(false)
            .prompt()
            .context("confirmation failed")
    }
}
