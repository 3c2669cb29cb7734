//! DynamoDB attribute names and expressions.
//!
//! Pure values and functions describing the table layout. All functions are
//! sync and have no side effects.

use std::collections::HashMap;

// ============================================================================
// Attribute names
// ============================================================================

pub const ID: &str = "id";
pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const EMAIL: &str = "email";
pub const DATE_OF_BIRTH: &str = "dateOfBirth";
pub const CREATED_AT: &str = "createdAt";
pub const LAST_MODIFIED: &str = "lastModified";

/// Attributes an update may overwrite. `id` and `createdAt` are never in
/// this list.
pub const MUTABLE_ATTRIBUTES: [&str; 5] =
    [FIRST_NAME, LAST_NAME, EMAIL, DATE_OF_BIRTH, LAST_MODIFIED];

// ============================================================================
// Conditions
// ============================================================================

/// Precondition for create: no item with this key.
pub const KEY_ABSENT: &str = "attribute_not_exists(id)";

/// Precondition for update and delete: an item with this key exists.
pub const KEY_PRESENT: &str = "attribute_exists(id)";

/// Key condition for the email index query.
pub const EMAIL_KEY_CONDITION: &str = "#email = :email";

// ============================================================================
// Update expression
// ============================================================================

/// Placeholder for an attribute name, e.g. `#firstName`.
pub fn name_placeholder(attribute: &str) -> String {
    format!("#{attribute}")
}

/// Placeholder for an attribute value, e.g. `:firstName`.
pub fn value_placeholder(attribute: &str) -> String {
    format!(":{attribute}")
}

/// Generate the `SET` expression for an update.
///
/// Pattern: `SET #firstName = :firstName, #lastName = :lastName, ...`
pub fn update_expression() -> String {
    let assignments: Vec<String> = MUTABLE_ATTRIBUTES
        .iter()
        .map(|attr| format!("{} = {}", name_placeholder(attr), value_placeholder(attr)))
        .collect();
    format!("SET {}", assignments.join(", "))
}

/// Name placeholders used by [`update_expression`].
pub fn update_attribute_names() -> HashMap<String, String> {
    MUTABLE_ATTRIBUTES
        .iter()
        .map(|attr| (name_placeholder(attr), attr.to_string()))
        .collect()
}
