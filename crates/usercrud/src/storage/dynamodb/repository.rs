//! DynamoDB repository implementation.
//!
//! Implements `UserRepository` from `usercrud_core::storage` using DynamoDB.
//! Email uniqueness is checked through the email index before each write;
//! the check and the write are separate requests, so two concurrent writers
//! can still claim the same address.

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::delete_item::builders::DeleteItemFluentBuilder;
use aws_sdk_dynamodb::operation::get_item::builders::GetItemFluentBuilder;
use aws_sdk_dynamodb::operation::put_item::builders::PutItemFluentBuilder;
use aws_sdk_dynamodb::operation::query::builders::QueryFluentBuilder;
use aws_sdk_dynamodb::operation::update_item::builders::UpdateItemFluentBuilder;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use usercrud_core::storage::{ensure_email_available, RepositoryError, Result, UserRepository};
use usercrud_core::user::{next_last_modified, now, User};

use super::conversions::{item_to_user, update_values, user_to_item};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error,
    map_update_item_error,
};
use super::keys;

/// DynamoDB-based repository implementation.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
    email_index: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client, table and
    /// email index names.
    pub fn new(
        client: Client,
        table_name: impl Into<String>,
        email_index: impl Into<String>,
    ) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            email_index: email_index.into(),
        }
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn key(id: Uuid) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }

    // ========================================================================
    // Request builders
    // ========================================================================

    /// Point lookup by primary key.
    ///
    /// Strongly consistent: a default GetItem is eventually consistent and
    /// may not reflect a write that already succeeded. Update relies on this
    /// read for `NotFound` and for the stored `lastModified`.
    fn get_request(&self, id: Uuid) -> GetItemFluentBuilder {
        self.client
            .get_item()
            .table_name(&self.table_name)
            .key(keys::ID, Self::key(id))
            .consistent_read(true)
    }

    /// Email lookup through the secondary index. Index queries are always
    /// eventually consistent.
    fn email_query(&self, email: &str) -> QueryFluentBuilder {
        self.client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.email_index)
            .key_condition_expression(keys::EMAIL_KEY_CONDITION)
            .expression_attribute_names(keys::name_placeholder(keys::EMAIL), keys::EMAIL)
            .expression_attribute_values(
                keys::value_placeholder(keys::EMAIL),
                AttributeValue::S(email.to_string()),
            )
    }

    /// Write of a new item, guarded by key absent.
    fn put_request(&self, user: &User) -> PutItemFluentBuilder {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(user_to_item(user)))
            .condition_expression(keys::KEY_ABSENT)
    }

    /// Overwrite of the mutable attributes, guarded by key present.
    fn update_request(
        &self,
        user: &User,
        last_modified: DateTime<Utc>,
    ) -> UpdateItemFluentBuilder {
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(keys::ID, Self::key(user.id))
            .update_expression(keys::update_expression())
            .set_expression_attribute_names(Some(keys::update_attribute_names()))
            .set_expression_attribute_values(Some(update_values(user, last_modified)))
            .condition_expression(keys::KEY_PRESENT)
            .return_values(ReturnValue::AllNew)
    }

    /// Removal, guarded by key present.
    fn delete_request(&self, id: Uuid) -> DeleteItemFluentBuilder {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(keys::ID, Self::key(id))
            .condition_expression(keys::KEY_PRESENT)
    }
}

#[async_trait]
impl UserRepository for DynamoDbRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let result = self
            .get_request(id)
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_user(&item)?)),
            None => Ok(None),
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = self
            .email_query(email)
            .send()
            .await
            .map_err(map_query_error)?;

        let items = result.items.unwrap_or_default();
        match items.first() {
            Some(item) => Ok(Some(item_to_user(item)?)),
            None => Ok(None),
        }
    }

    async fn create_user(&self, user: &User) -> Result<User> {
        let existing = self.get_user_by_email(&user.email).await?;
        ensure_email_available(existing.as_ref(), user.id)?;

        self.put_request(user)
            .send()
            .await
            .map_err(|e| map_put_item_error(e, user.id))?;

        tracing::debug!(user_id = %user.id, table = %self.table_name, "User created");
        Ok(user.clone())
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        let existing = self.get_user_by_email(&user.email).await?;
        ensure_email_available(existing.as_ref(), user.id)?;

        let stored = self
            .get_user(user.id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound {
                entity_type: "User",
                id: user.id.to_string(),
            })?;
        let last_modified = next_last_modified(stored.last_modified, now());

        let result = self
            .update_request(user, last_modified)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, user.id))?;

        let attributes = result.attributes.ok_or_else(|| {
            RepositoryError::Serialization("UpdateItem returned no attributes".to_string())
        })?;
        let updated = item_to_user(&attributes)?;

        tracing::debug!(user_id = %user.id, table = %self.table_name, "User updated");
        Ok(updated)
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
        self.delete_request(id)
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, id))?;

        tracing::debug!(user_id = %id, table = %self.table_name, "User deleted");
        Ok(())
    }
}
