//! The item access engine.

use crate::{common, config, error, read, store, write};

use aws_sdk_dynamodb::operation;
use serde::Serialize;

/// Validates, builds and sends item operations through a [`store::StoreClient`].
///
/// Every operation takes `&self` and is independent of the others; the
/// engine holds no state between calls besides its configuration.
///
/// ```rust,no_run
/// use dynamodb_item_access::{ItemAccess, common, config::Config};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = ItemAccess::connect(Config::default()).await;
/// engine.put(json!({"id": "4666fsffr", "val": 1}), "T", false).await?;
/// let outcome = engine
///     .get(common::key::ItemKey::partition("id", json!("4666fsffr")), "T")
///     .await?;
/// assert!(outcome.is_found());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ItemAccess<S> {
    config: config::Config,
    store: S,
}

impl ItemAccess<store::dynamodb::DynamoDbStore> {
    /// Builds an engine backed by DynamoDB in the configured region.
    pub async fn connect(config: config::Config) -> Self {
        let store = store::dynamodb::DynamoDbStore::connect(&config).await;
        Self::new(store, config)
    }
}

impl<S: store::StoreClient> ItemAccess<S> {
    /// Creates an engine over `store`.
    pub fn new(store: S, config: config::Config) -> Self {
        Self { config, store }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &config::Config {
        &self.config
    }

    /// The underlying store client.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates `item`. Unless `overwrite_allowed`, fails with
    /// [`error::ErrorCode::ItemExists`] when an item with the same key exists.
    pub async fn put<T: Serialize>(
        &self,
        item: T,
        table_name: impl Into<String>,
        overwrite_allowed: bool,
    ) -> Result<operation::put_item::PutItemOutput, error::OperationError> {
        write::put_item::PutItem {
            item,
            key_attribute: self.config.key_attribute().to_string(),
            overwrite_allowed,
            table_name: table_name.into(),
        }
        .send(&self.store)
        .await
    }

    /// Sets `fields` on the existing item at `key`, under the optional extra `condition`.
    pub async fn update<T: Serialize>(
        &self,
        key: common::key::ItemKey<T>,
        table_name: impl Into<String>,
        fields: Vec<common::expression::UpdateField<T>>,
        condition: Option<common::expression::ConditionExpression<T>>,
    ) -> Result<operation::update_item::UpdateItemOutput, error::OperationError> {
        write::update_item::UpdateItem {
            key,
            fields,
            condition,
            table_name: table_name.into(),
        }
        .send(&self.store)
        .await
    }

    /// Deletes the item at `key` when `condition` holds.
    pub async fn delete<T: Serialize>(
        &self,
        key: common::key::ItemKey<T>,
        table_name: impl Into<String>,
        condition: common::expression::ConditionExpression<T>,
    ) -> Result<operation::delete_item::DeleteItemOutput, error::OperationError> {
        write::delete_item::DeleteItem {
            key,
            condition,
            table_name: table_name.into(),
        }
        .send(&self.store)
        .await
    }

    /// Fetches the item at `key`.
    pub async fn get<T: Serialize>(
        &self,
        key: common::key::ItemKey<T>,
        table_name: impl Into<String>,
    ) -> Result<read::get_item::GetOutcome, error::OperationError> {
        read::get_item::GetItem {
            key,
            table_name: table_name.into(),
        }
        .send(&self.store)
        .await
    }

    /// Returns the first page of items matching `key_condition`, on the table
    /// or on `index_name` when given and non-empty.
    pub async fn query<T: Serialize>(
        &self,
        key_condition: common::expression::ConditionExpression<T>,
        table_name: impl Into<String>,
        index_name: Option<&str>,
    ) -> Result<Vec<common::Item>, error::OperationError> {
        read::query::Query {
            key_condition,
            index_name: index_name.map(str::to_string),
            table_name: table_name.into(),
        }
        .send(&self.store)
        .await
    }

    /// Always fails with [`error::ErrorCode::NotImplemented`].
    pub async fn scan(
        &self,
        table_name: impl Into<String>,
    ) -> Result<Vec<common::Item>, error::OperationError> {
        read::scan::Scan {
            table_name: table_name.into(),
        }
        .send()
        .await
    }
}
