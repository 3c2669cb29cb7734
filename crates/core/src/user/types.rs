use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValidationError;
use super::timestamps;
use super::validation::ValidationRules;

/// A stored user profile.
///
/// `id` is the primary key and never changes. `email` is unique across all
/// users, which the repository (not this type) enforces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(with = "crate::serde::date_time", alias = "DOB")]
    pub date_of_birth: DateTime<FixedOffset>,
    /// Set once at creation.
    #[serde(with = "crate::serde::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Set at creation and replaced by the repository on every update.
    #[serde(with = "crate::serde::timestamp")]
    pub last_modified: DateTime<Utc>,
}

/// Fields a caller supplies to create a user.
///
/// Missing JSON attributes deserialize as empty strings so they are
/// reported as validation errors rather than parse errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(alias = "DOB")]
    pub date_of_birth: String,
}

/// An unvalidated user record, as round-tripped by callers on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawUser {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(alias = "DOB")]
    pub date_of_birth: String,
    pub created_at: String,
    pub last_modified: String,
}

impl NewUser {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        date_of_birth: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            date_of_birth: date_of_birth.into(),
        }
    }
}

impl User {
    /// Builds a brand new user.
    ///
    /// Assigns a fresh v4 id and stamps `created_at` and `last_modified`
    /// with the same instant. Fields are checked in declaration order and
    /// the first failure is returned.
    pub fn new(rules: &ValidationRules, new_user: NewUser) -> Result<Self, ValidationError> {
        rules.required("firstName", &new_user.first_name)?;
        rules.required("lastName", &new_user.last_name)?;
        rules.email("email", &new_user.email)?;
        let date_of_birth = rules.date_time("dateOfBirth", &new_user.date_of_birth)?;

        let now = timestamps::now();

        Ok(Self {
            id: Uuid::new_v4(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            date_of_birth,
            created_at: now,
            last_modified: now,
        })
    }

    /// Builds a user from a caller-supplied record that already carries its
    /// id and timestamps. They are validated and taken as given.
    pub fn parse(rules: &ValidationRules, raw: RawUser) -> Result<Self, ValidationError> {
        let id = rules.id("id", &raw.id)?;
        rules.required("firstName", &raw.first_name)?;
        rules.required("lastName", &raw.last_name)?;
        rules.email("email", &raw.email)?;
        let date_of_birth = rules.date_time("dateOfBirth", &raw.date_of_birth)?;
        let created_at = rules.timestamp("createdAt", &raw.created_at)?;
        let last_modified = rules.timestamp("lastModified", &raw.last_modified)?;

        Ok(Self {
            id,
            first_name: raw.first_name,
            last_name: raw.last_name,
            email: raw.email,
            date_of_birth,
            created_at,
            last_modified,
        })
    }

    /// Sets a specific ID for this user (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Replaces the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}
