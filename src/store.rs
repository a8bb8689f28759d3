//! The store client capability the engine sends requests through.

/// Store client backed by `aws_sdk_dynamodb`.
pub mod dynamodb;

#[cfg(test)]
pub(crate) mod memory;

use crate::{error, read, write};

use async_trait::async_trait;
use aws_sdk_dynamodb::operation;

/// Primitive item operations of the remote store.
///
/// Each call takes a fully built request document and returns the store's
/// response unmodified or a [`error::StoreFailure`]. Implementations must not
/// retry.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Writes an item.
    async fn put_item(
        &self,
        input: write::put_item::PutItemInput,
    ) -> Result<operation::put_item::PutItemOutput, error::StoreFailure>;

    /// Applies an update expression to an item.
    async fn update_item(
        &self,
        input: write::update_item::UpdateItemInput,
    ) -> Result<operation::update_item::UpdateItemOutput, error::StoreFailure>;

    /// Deletes an item.
    async fn delete_item(
        &self,
        input: write::delete_item::DeleteItemInput,
    ) -> Result<operation::delete_item::DeleteItemOutput, error::StoreFailure>;

    /// Fetches an item by key.
    async fn get_item(
        &self,
        input: read::get_item::GetItemInput,
    ) -> Result<operation::get_item::GetItemOutput, error::StoreFailure>;

    /// Runs a key-condition query and returns one page of results.
    async fn query(
        &self,
        input: read::query::QueryInput,
    ) -> Result<operation::query::QueryOutput, error::StoreFailure>;
}
