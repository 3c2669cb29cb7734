//! Table provisioning for local DynamoDB setups.
//!
//! Creates the user table (hash key `id`) with a pay-per-request email
//! index and waits until both are active. Existing tables are left alone.

use std::time::Duration;

use aws_sdk_dynamodb::error::BuildError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, GlobalSecondaryIndex, IndexStatus, KeySchemaElement,
    KeyType, Projection, ProjectionType, ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::Client;
use thiserror::Error;

use super::keys;

const ACTIVATION_ATTEMPTS: u32 = 60;
const ACTIVATION_DELAY: Duration = Duration::from_secs(2);

/// Errors that can occur while provisioning the user table.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Invalid table definition: {0}")]
    Definition(#[from] BuildError),

    #[error("Timeout waiting for table '{0}' to become active")]
    TableActivationTimeout(String),
}

/// Where a table stands on the way to being usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableState {
    Missing,
    Pending,
    Active,
}

/// Create the user table and its email index unless the table already exists.
pub async fn create_user_table(
    client: &Client,
    table_name: &str,
    email_index: &str,
) -> Result<(), SchemaError> {
    if table_state(client, table_name).await? != TableState::Missing {
        tracing::info!(table = %table_name, "Table already exists, skipping creation");
        return wait_for_table_active(client, table_name).await;
    }

    client
        .create_table()
        .table_name(table_name)
        .set_key_schema(Some(vec![hash_key(keys::ID)?]))
        .set_attribute_definitions(Some(attribute_definitions()?))
        .global_secondary_indexes(email_index_definition(email_index)?)
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await
        .map_err(|e| SchemaError::AwsSdk(e.to_string()))?;

    tracing::info!(table = %table_name, index = %email_index, "Table created");
    wait_for_table_active(client, table_name).await
}

fn hash_key(attribute: &str) -> Result<KeySchemaElement, BuildError> {
    KeySchemaElement::builder()
        .attribute_name(attribute)
        .key_type(KeyType::Hash)
        .build()
}

/// Only key attributes are declared; everything else is schemaless.
fn attribute_definitions() -> Result<Vec<AttributeDefinition>, BuildError> {
    [keys::ID, keys::EMAIL]
        .into_iter()
        .map(|name| {
            AttributeDefinition::builder()
                .attribute_name(name)
                .attribute_type(ScalarAttributeType::S)
                .build()
        })
        .collect()
}

fn email_index_definition(index_name: &str) -> Result<GlobalSecondaryIndex, BuildError> {
    GlobalSecondaryIndex::builder()
        .index_name(index_name)
        .key_schema(hash_key(keys::EMAIL)?)
        .projection(
            Projection::builder()
                .projection_type(ProjectionType::All)
                .build(),
        )
        .build()
}

async fn table_state(client: &Client, table_name: &str) -> Result<TableState, SchemaError> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(response) => {
            let Some(table) = response.table() else {
                return Ok(TableState::Missing);
            };
            let indexes_active = table
                .global_secondary_indexes()
                .iter()
                .all(|gsi| gsi.index_status() == Some(&IndexStatus::Active));

            if table.table_status() == Some(&TableStatus::Active) && indexes_active {
                Ok(TableState::Active)
            } else {
                Ok(TableState::Pending)
            }
        }
        Err(err) => match err.into_service_error() {
            DescribeTableError::ResourceNotFoundException(_) => Ok(TableState::Missing),
            err => Err(SchemaError::AwsSdk(err.to_string())),
        },
    }
}

async fn wait_for_table_active(client: &Client, table_name: &str) -> Result<(), SchemaError> {
    for _ in 0..ACTIVATION_ATTEMPTS {
        if table_state(client, table_name).await? == TableState::Active {
            return Ok(());
        }
        tokio::time::sleep(ACTIVATION_DELAY).await;
    }

    Err(SchemaError::TableActivationTimeout(table_name.to_string()))
}
