use crate::{common, error, store, write};

use aws_sdk_dynamodb::operation;
use serde::Serialize;
use serde_dynamo::to_item;

/// Put item request document.
#[derive(Clone, Debug, PartialEq)]
pub struct PutItemInput {
    /// The item to write.
    pub item: common::Item,
    /// Table name and condition.
    pub write_input: write::common::WriteInput,
}

/// Put item operation.
///
/// Unless `overwrite_allowed` is set, the write is conditioned on the key
/// attribute being absent, so an existing item is never clobbered.
///
/// ```rust,no_run
/// use dynamodb_item_access::{store, write};
/// use serde_json::json;
///
/// # async fn example(store: &impl store::StoreClient) -> Result<(), Box<dyn std::error::Error>> {
/// let put_item = write::put_item::PutItem {
///     item: json!({"id": "1", "name": "John"}),
///     key_attribute: "id".to_string(),
///     overwrite_allowed: false,
///     table_name: "users".to_string(),
/// };
/// put_item.send(store).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PutItem<T> {
    /// The item to put into the table.
    pub item: T,
    /// The table's partition key attribute, which the item must contain.
    pub key_attribute: String,
    /// Whether an existing item with the same key may be replaced.
    pub overwrite_allowed: bool,
    /// The table to write to.
    pub table_name: String,
}

impl<T: Serialize> TryFrom<PutItem<T>> for PutItemInput {
    type Error = error::InvalidData;

    fn try_from(put_item: PutItem<T>) -> Result<Self, Self::Error> {
        let mut write_input = write::common::WriteInput::new(put_item.table_name)?;
        if put_item.key_attribute.is_empty() {
            return Err(error::InvalidData::EmptyKeyName);
        }
        let item: common::Item = to_item(put_item.item)?;
        if item.is_empty() {
            return Err(error::InvalidData::EmptyItem);
        }
        match item.get(&put_item.key_attribute) {
            None => {
                return Err(error::InvalidData::MissingKeyAttribute(
                    put_item.key_attribute,
                ));
            }
            Some(value) if common::key::is_empty_key_value(value) => {
                return Err(error::InvalidData::EmptyKeyValue(put_item.key_attribute));
            }
            Some(_) => {}
        }
        if !put_item.overwrite_allowed {
            let condition =
                common::expression::build_existence_condition(&put_item.key_attribute, false, None);
            write_input.set_condition(condition);
        }
        let operation = Self { item, write_input };
        Ok(operation)
    }
}

impl<T: Serialize> PutItem<T> {
    fn call_context(&self) -> error::CallContext {
        error::CallContext::default()
            .with("item", &self.item)
            .with("table_name", &self.table_name)
            .with("overwrite_allowed", &self.overwrite_allowed)
    }

    /// Execute the put item operation.
    ///
    /// Returns the store's response unmodified. A failed absence condition is
    /// reported as [`error::ErrorCode::ItemExists`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "item_access.put_item",
            skip_all,
            fields(table_name = %self.table_name),
            err
        )
    )]
    pub async fn send<S: store::StoreClient + ?Sized>(
        self,
        store: &S,
    ) -> Result<operation::put_item::PutItemOutput, error::OperationError> {
        let context = self.call_context();
        let put_item: PutItemInput = match self.try_into() {
            Ok(put_item) => put_item,
            Err(err) => return Err(error::OperationError::invalid_data(err, context)),
        };
        store.put_item(put_item).await.map_err(|failure| {
            error::OperationError::from_store(failure, error::ErrorCode::ItemExists, context)
        })
    }
}
