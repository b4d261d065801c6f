//! Field validation for user records

use crate::error::{CommonError, Result};
use regex::Regex;

/// Maximum length of an email address
const MAX_EMAIL_LENGTH: usize = 254;

/// Email validation
pub struct EmailValidator {
    pattern: Regex,
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self {
            pattern: Regex::new(r"^[a-zA-Z0-9._%+'-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
                .expect("email pattern is a valid regex"),
        }
    }
}

impl EmailValidator {
    /// Validate an email address
    pub fn validate(&self, email: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(CommonError::Validation(
                "Email address cannot be empty".to_string(),
            ));
        }

        if !self.pattern.is_match(email) {
            return Err(CommonError::Validation(
                "Invalid email address format".to_string(),
            ));
        }

        if email.len() > MAX_EMAIL_LENGTH {
            return Err(CommonError::Validation(
                "Email address is too long".to_string(),
            ));
        }

        if email.contains("..") {
            return Err(CommonError::Validation(
                "Email address cannot contain consecutive dots".to_string(),
            ));
        }

        Ok(())
    }
}

/// Reject blank values for a required field
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CommonError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}
