use chrono::{DateTime, FixedOffset, Utc};
use regex::Regex;
use uuid::Uuid;

use crate::serde::{parse_date_time, parse_timestamp};

use super::error::{ValidationError, ValidationReason};

/// Local part and domain labels as accepted by HTML form email inputs.
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

/// Field rules applied when building a [`User`](super::User).
///
/// Built once at startup and shared read-only; it holds the compiled
/// patterns so individual validations do not recompile them.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    email: Regex,
}

impl ValidationRules {
    /// Compiles the rule set.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            email: Regex::new(EMAIL_PATTERN)?,
        })
    }

    /// Returns whether `email` is a syntactically valid address.
    pub fn is_valid_email(&self, email: &str) -> bool {
        self.email.is_match(email)
    }

    /// Rejects empty and whitespace-only values.
    pub fn required(&self, field: &'static str, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new(field, ValidationReason::Missing));
        }
        Ok(())
    }

    pub fn email(&self, field: &'static str, value: &str) -> Result<(), ValidationError> {
        self.required(field, value)?;
        if !self.is_valid_email(value) {
            return Err(ValidationError::new(field, ValidationReason::InvalidEmail));
        }
        Ok(())
    }

    pub fn date_time(
        &self,
        field: &'static str,
        value: &str,
    ) -> Result<DateTime<FixedOffset>, ValidationError> {
        self.required(field, value)?;
        parse_date_time(value)
            .map_err(|_| ValidationError::new(field, ValidationReason::InvalidDateTime))
    }

    pub fn timestamp(
        &self,
        field: &'static str,
        value: &str,
    ) -> Result<DateTime<Utc>, ValidationError> {
        self.required(field, value)?;
        parse_timestamp(value)
            .map_err(|_| ValidationError::new(field, ValidationReason::InvalidDateTime))
    }

    pub fn id(&self, field: &'static str, value: &str) -> Result<Uuid, ValidationError> {
        self.required(field, value)?;
        Uuid::parse_str(value).map_err(|_| ValidationError::new(field, ValidationReason::InvalidId))
    }
}
