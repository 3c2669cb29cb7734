//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and the
//! `User` domain type. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, FixedOffset, Utc};
use uuid::Uuid;

use usercrud_core::serde::{format_date_time, format_timestamp, parse_date_time, parse_timestamp};
use usercrud_core::storage::RepositoryError;
use usercrud_core::user::User;

use super::keys;

// ============================================================================
// User conversions
// ============================================================================

/// Convert a User to DynamoDB item.
pub fn user_to_item(user: &User) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    item.insert(keys::ID.to_string(), AttributeValue::S(user.id.to_string()));
    item.insert(
        keys::CREATED_AT.to_string(),
        AttributeValue::S(format_timestamp(&user.created_at)),
    );
    item.extend(mutable_attributes(user, user.last_modified));

    item
}

/// Expression attribute values for an update of `user`.
///
/// Keys are the value placeholders of [`keys::update_expression`];
/// `last_modified` is the repository-assigned timestamp, not the caller's.
pub fn update_values(
    user: &User,
    last_modified: DateTime<Utc>,
) -> HashMap<String, AttributeValue> {
    mutable_attributes(user, last_modified)
        .into_iter()
        .map(|(name, value)| (keys::value_placeholder(&name), value))
        .collect()
}

fn mutable_attributes(
    user: &User,
    last_modified: DateTime<Utc>,
) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            keys::FIRST_NAME.to_string(),
            AttributeValue::S(user.first_name.clone()),
        ),
        (
            keys::LAST_NAME.to_string(),
            AttributeValue::S(user.last_name.clone()),
        ),
        (keys::EMAIL.to_string(), AttributeValue::S(user.email.clone())),
        (
            keys::DATE_OF_BIRTH.to_string(),
            AttributeValue::S(format_date_time(&user.date_of_birth)),
        ),
        (
            keys::LAST_MODIFIED.to_string(),
            AttributeValue::S(format_timestamp(&last_modified)),
        ),
    ])
}

/// Convert a DynamoDB item to User.
pub fn item_to_user(item: &HashMap<String, AttributeValue>) -> Result<User, RepositoryError> {
    Ok(User {
        id: get_uuid(item, keys::ID)?,
        first_name: get_string(item, keys::FIRST_NAME)?,
        last_name: get_string(item, keys::LAST_NAME)?,
        email: get_string(item, keys::EMAIL)?,
        date_of_birth: get_date_time(item, keys::DATE_OF_BIRTH)?,
        created_at: get_timestamp(item, keys::CREATED_AT)?,
        last_modified: get_timestamp(item, keys::LAST_MODIFIED)?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::Serialization(format!("Missing or invalid field: {}", key)))
}

/// Get a required UUID attribute.
fn get_uuid(item: &HashMap<String, AttributeValue>, key: &str) -> Result<Uuid, RepositoryError> {
    let s = get_string(item, key)?;
    Uuid::parse_str(&s)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid UUID {}: {}", key, e)))
}

/// Get a required UTC timestamp attribute.
fn get_timestamp(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    parse_timestamp(&s)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}

/// Get a required RFC 3339 date-time attribute, keeping its offset.
fn get_date_time(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<FixedOffset>, RepositoryError> {
    let s = get_string(item, key)?;
    parse_date_time(&s)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap(),
            first_name: "Fred".to_string(),
            last_name: "Flintstone".to_string(),
            email: "fred@example.com".to_string(),
            date_of_birth: DateTime::parse_from_rfc3339("1970-12-09T00:00:00-05:00").unwrap(),
            created_at: DateTime::parse_from_rfc3339("2024-01-15T10:30:00.123Z")
                .unwrap()
                .with_timezone(&Utc),
            last_modified: DateTime::parse_from_rfc3339("2024-01-16T08:00:00.456Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[test]
    fn test_user_roundtrip() {
        let user = sample_user();
        let item = user_to_item(&user);
        let parsed = item_to_user(&item).unwrap();
        assert_eq!(user, parsed);
    }

    #[test]
    fn test_user_item_attributes() {
        let item = user_to_item(&sample_user());

        assert_eq!(item.len(), 7);
        assert_eq!(
            item.get("id").unwrap().as_s().unwrap(),
            "550e8400-e29b-41d4-a716-446655440001"
        );
        assert_eq!(item.get("firstName").unwrap().as_s().unwrap(), "Fred");
        assert_eq!(
            item.get("createdAt").unwrap().as_s().unwrap(),
            "2024-01-15T10:30:00.123Z"
        );
        assert_eq!(
            item.get("dateOfBirth").unwrap().as_s().unwrap(),
            "1970-12-09T00:00:00-05:00"
        );
    }

    #[test]
    fn test_update_values_use_assigned_timestamp() {
        let user = sample_user();
        let assigned = DateTime::parse_from_rfc3339("2024-02-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let values = update_values(&user, assigned);

        assert_eq!(values.len(), keys::MUTABLE_ATTRIBUTES.len());
        assert_eq!(
            values.get(":lastModified").unwrap().as_s().unwrap(),
            "2024-02-01T00:00:00.000Z"
        );
        assert!(!values.contains_key(":createdAt"));
        assert!(!values.contains_key(":id"));
    }

    #[test]
    fn test_item_missing_field() {
        let mut item = user_to_item(&sample_user());
        item.remove("email");

        let err = item_to_user(&item).unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }

    #[test]
    fn test_item_wrong_attribute_type() {
        let mut item = user_to_item(&sample_user());
        item.insert("lastName".to_string(), AttributeValue::N("42".to_string()));

        assert!(item_to_user(&item).is_err());
    }

    #[test]
    fn test_item_invalid_uuid() {
        let mut item = user_to_item(&sample_user());
        item.insert("id".to_string(), AttributeValue::S("not-a-uuid".to_string()));

        let err = item_to_user(&item).unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidData(_)));
    }

    #[test]
    fn test_item_invalid_timestamp() {
        let mut item = user_to_item(&sample_user());
        item.insert(
            "lastModified".to_string(),
            AttributeValue::S("yesterday".to_string()),
        );

        let err = item_to_user(&item).unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidData(_)));
    }
}
