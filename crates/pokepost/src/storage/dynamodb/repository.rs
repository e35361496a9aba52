//! DynamoDB backend implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use serde_json::Value;

use pokepost_core::record::{Record, FIELD_ID};
use pokepost_core::storage::{KeyValueBackend, Result, StoreError};

use super::conversions::{item_to_record, json_to_attribute, record_to_item};
use super::error::{invalid_limit, map_sdk_error};

/// DynamoDB-based backend.
///
/// Tables are addressed per call; every table uses `id` (string) as its
/// partition key.
pub struct DynamoDbBackend {
    client: Client,
}

impl DynamoDbBackend {
    /// Creates a new backend with the given DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a new backend using the AWS SDK default configuration chain.
    ///
    /// `AWS_ENDPOINT_URL` may point the client at a local DynamoDB.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }
}

fn key(id: &str) -> AttributeValue {
    AttributeValue::S(id.to_string())
}

#[async_trait]
impl KeyValueBackend for DynamoDbBackend {
    async fn put_item(&self, table: &str, record: &Record) -> Result<()> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(record_to_item(record)))
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(())
    }

    async fn get_item(&self, table: &str, id: &str) -> Result<Option<Record>> {
        let result = self
            .client
            .get_item()
            .table_name(table)
            .key(FIELD_ID, key(id))
            .consistent_read(true)
            .send()
            .await
            .map_err(map_sdk_error)?;

        result.item.as_ref().map(item_to_record).transpose()
    }

    async fn scan(&self, table: &str, limit: Option<&str>) -> Result<Vec<Record>> {
        // A capped scan is a single page; an uncapped one walks every page.
        if let Some(raw) = limit {
            let limit: i32 = raw.parse().map_err(|_| invalid_limit(raw))?;
            let result = self
                .client
                .scan()
                .table_name(table)
                .limit(limit)
                .send()
                .await
                .map_err(map_sdk_error)?;

            return result.items().iter().map(item_to_record).collect();
        }

        let mut records = Vec::new();
        let mut start_key = None;
        loop {
            let result = self
                .client
                .scan()
                .table_name(table)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_sdk_error)?;

            for item in result.items() {
                records.push(item_to_record(item)?);
            }

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(records)
    }

    async fn update_field(
        &self,
        table: &str,
        id: &str,
        field: &str,
        value: &Value,
    ) -> Result<Record> {
        let result = self
            .client
            .update_item()
            .table_name(table)
            .key(FIELD_ID, key(id))
            .condition_expression("attribute_exists(#id)")
            .update_expression("SET #field = :value")
            .expression_attribute_names("#id", FIELD_ID)
            .expression_attribute_names("#field", field)
            .expression_attribute_values(":value", json_to_attribute(value))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(map_sdk_error)?;

        match result.attributes {
            Some(attributes) => item_to_record(&attributes),
            None => Err(StoreError::Serialization(
                "UpdateItem returned no attributes".to_string(),
            )),
        }
    }

    async fn delete_item(&self, table: &str, id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(table)
            .key(FIELD_ID, key(id))
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(())
    }
}
