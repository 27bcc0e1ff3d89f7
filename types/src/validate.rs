//! Form checks shared by the pages. Each returns the message shown in the
//! toast when it fails.

use crate::{Amount, Result, err};

pub fn required(fields: &[&str], message: &str) -> Result<()> {
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(err!("{message}"));
    }
    Ok(())
}

/// A non-empty, strictly positive amount.
pub fn positive_amount(input: &str, message: &str) -> Result<Amount> {
    match Amount::parse(input) {
        Ok(amount) if amount.is_positive() => Ok(amount),
        _ => Err(err!("{message}")),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

/// Per-field messages for a rejected [`PasswordChange`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordErrors {
    pub current: Option<&'static str>,
    pub new: Option<&'static str>,
    pub confirm: Option<&'static str>,
}

impl PasswordErrors {
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.new.is_none() && self.confirm.is_none()
    }
}

pub const MIN_PASSWORD_LEN: usize = 8;

impl PasswordChange {
    pub fn validate(&self) -> Result<(), PasswordErrors> {
        let mut errors = PasswordErrors::default();

        if self.current.is_empty() {
            errors.current = Some("Current password is required");
        }

        if self.new.is_empty() {
            errors.new = Some("New password is required");
        } else if self.new.chars().count() < MIN_PASSWORD_LEN {
            errors.new = Some("Password must be at least 8 characters");
        }

        if self.confirm.is_empty() {
            errors.confirm = Some("Please confirm your password");
        } else if self.confirm != self.new {
            errors.confirm = Some("Passwords do not match");
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
