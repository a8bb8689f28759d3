use crate::{config, error, read, store, write};

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, error::ProvideErrorMetadata, error::SdkError, operation};
use std::fmt;

const CONDITIONAL_CHECK_FAILED: &str = "ConditionalCheckFailedException";

/// [`store::StoreClient`] over an `aws_sdk_dynamodb::Client`.
///
/// ```rust,no_run
/// use dynamodb_item_access::{config::Config, store::dynamodb::DynamoDbStore};
///
/// # async fn example() {
/// let store = DynamoDbStore::connect(&Config::default().with_region("us-east-1")).await;
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    /// Wraps an existing client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the default AWS credential chain for the configured region.
    pub async fn connect(config: &config::Config) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region().to_string()))
            .load()
            .await;
        Self::new(Client::new(&sdk_config))
    }

    /// The underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Sorts an SDK error into condition failure, other service error or transport failure.
fn classify<E, R>(err: SdkError<E, R>) -> error::StoreFailure
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: fmt::Debug + Send + Sync + 'static,
{
    let metadata = err.as_service_error().map(|service| {
        (
            service.code().unwrap_or_default().to_string(),
            service.message().unwrap_or_default().to_string(),
        )
    });
    match metadata {
        Some((code, message)) if code == CONDITIONAL_CHECK_FAILED => {
            error::StoreFailure::ConditionalCheckFailed(message)
        }
        Some((code, message)) => error::StoreFailure::Service { code, message },
        None => error::StoreFailure::Transport(Box::new(err)),
    }
}

#[async_trait]
impl store::StoreClient for DynamoDbStore {
    async fn put_item(
        &self,
        input: write::put_item::PutItemInput,
    ) -> Result<operation::put_item::PutItemOutput, error::StoreFailure> {
        let builder = self.client.put_item().set_item(Some(input.item));
        crate::apply_write_operation!(builder, input.write_input)
            .send()
            .await
            .map_err(classify)
    }

    async fn update_item(
        &self,
        input: write::update_item::UpdateItemInput,
    ) -> Result<operation::update_item::UpdateItemOutput, error::StoreFailure> {
        let builder = self
            .client
            .update_item()
            .set_key(Some(input.key))
            .update_expression(input.update_expression);
        crate::apply_write_operation!(builder, input.write_input)
            .send()
            .await
            .map_err(classify)
    }

    async fn delete_item(
        &self,
        input: write::delete_item::DeleteItemInput,
    ) -> Result<operation::delete_item::DeleteItemOutput, error::StoreFailure> {
        let builder = self.client.delete_item().set_key(Some(input.key));
        crate::apply_write_operation!(builder, input.write_input)
            .send()
            .await
            .map_err(classify)
    }

    async fn get_item(
        &self,
        input: read::get_item::GetItemInput,
    ) -> Result<operation::get_item::GetItemOutput, error::StoreFailure> {
        self.client
            .get_item()
            .set_key(Some(input.key))
            .table_name(input.table_name)
            .send()
            .await
            .map_err(classify)
    }

    async fn query(
        &self,
        input: read::query::QueryInput,
    ) -> Result<operation::query::QueryOutput, error::StoreFailure> {
        self.client
            .query()
            .key_condition_expression(input.key_condition_expression)
            .set_expression_attribute_names(Some(input.expression_attribute_names))
            .set_expression_attribute_values(Some(input.expression_attribute_values))
            .set_index_name(input.index_name)
            .table_name(input.table_name)
            .send()
            .await
            .map_err(classify)
    }
}
