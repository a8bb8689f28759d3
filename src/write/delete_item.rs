use crate::{common, error, store, write};

use aws_sdk_dynamodb::operation;
use serde::Serialize;

/// Delete item request document.
#[derive(Clone, Debug, PartialEq)]
pub struct DeleteItemInput {
    /// The key of the item to delete.
    pub key: common::Item,
    /// Table name, condition and placeholders.
    pub write_input: write::common::WriteInput,
}

/// Delete item operation.
///
/// No existence condition is implied: the caller states the deletion
/// precondition explicitly.
///
/// ```rust,no_run
/// use dynamodb_item_access::{common, store, write};
///
/// # async fn example(store: &impl store::StoreClient) -> Result<(), Box<dyn std::error::Error>> {
/// let delete_item = write::delete_item::DeleteItem {
///     key: common::key::ItemKey::partition("id", "1".to_string()),
///     condition: common::expression::ConditionExpression::new("attribute_exists(id)"),
///     table_name: "users".to_string(),
/// };
/// delete_item.send(store).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DeleteItem<T> {
    /// The primary key of the item to delete.
    pub key: common::key::ItemKey<T>,
    /// The deletion precondition. Its expression must not be empty; its
    /// placeholder maps may be.
    pub condition: common::expression::ConditionExpression<T>,
    /// The table to delete from.
    pub table_name: String,
}

impl<T: Serialize> TryFrom<DeleteItem<T>> for DeleteItemInput {
    type Error = error::InvalidData;

    fn try_from(delete_item: DeleteItem<T>) -> Result<Self, Self::Error> {
        let mut write_input = write::common::WriteInput::new(delete_item.table_name)?;
        let key = delete_item.key.try_into()?;
        if delete_item.condition.expression.is_empty() {
            return Err(error::InvalidData::EmptyArgument("condition expression"));
        }
        let condition: common::ExpressionInput = delete_item.condition.try_into()?;
        write_input.set_condition(condition);
        let operation = Self { key, write_input };
        Ok(operation)
    }
}

impl<T: Serialize> DeleteItem<T> {
    fn call_context(&self) -> error::CallContext {
        error::CallContext::default()
            .with("key", &self.key)
            .with("table_name", &self.table_name)
            .with("condition", &self.condition)
    }

    /// Execute the delete item operation.
    ///
    /// Every store failure, including a failed condition, is reported as
    /// [`error::ErrorCode::DbError`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "item_access.delete_item",
            skip_all,
            fields(table_name = %self.table_name),
            err
        )
    )]
    pub async fn send<S: store::StoreClient + ?Sized>(
        self,
        store: &S,
    ) -> Result<operation::delete_item::DeleteItemOutput, error::OperationError> {
        let context = self.call_context();
        let delete_item: DeleteItemInput = match self.try_into() {
            Ok(delete_item) => delete_item,
            Err(err) => return Err(error::OperationError::invalid_data(err, context)),
        };
        store.delete_item(delete_item).await.map_err(|failure| {
            error::OperationError::from_store(failure, error::ErrorCode::DbError, context)
        })
    }
}
