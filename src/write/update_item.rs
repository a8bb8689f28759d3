use crate::{common, error, store, write};

use aws_sdk_dynamodb::operation;
use serde::Serialize;

/// Update item request document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateItemInput {
    /// The key of the item to update.
    pub key: common::Item,
    /// The `set` expression.
    pub update_expression: String,
    /// Table name, condition and placeholders.
    pub write_input: write::common::WriteInput,
}

/// Update item operation.
///
/// The item must already exist: the write is always conditioned on the
/// partition key being present, and any caller condition is appended to
/// that requirement rather than replacing it. Update fields set `:<name>`
/// value placeholders, which the caller condition must not reuse.
///
/// ```rust,no_run
/// use dynamodb_item_access::{common, store, write};
///
/// # async fn example(store: &impl store::StoreClient) -> Result<(), Box<dyn std::error::Error>> {
/// let update_item = write::update_item::UpdateItem {
///     key: common::key::ItemKey::partition("id", "1".to_string()),
///     fields: vec![common::expression::UpdateField::new("name", "New".to_string())],
///     condition: None,
///     table_name: "users".to_string(),
/// };
/// update_item.send(store).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateItem<T> {
    /// The primary key of the item to update.
    pub key: common::key::ItemKey<T>,
    /// The attributes to set, in order.
    pub fields: Vec<common::expression::UpdateField<T>>,
    /// Additional condition, conjoined with the existence requirement.
    pub condition: Option<common::expression::ConditionExpression<T>>,
    /// The table to write to.
    pub table_name: String,
}

impl<T: Serialize> TryFrom<UpdateItem<T>> for UpdateItemInput {
    type Error = error::InvalidData;

    fn try_from(update_item: UpdateItem<T>) -> Result<Self, Self::Error> {
        let mut write_input = write::common::WriteInput::new(update_item.table_name)?;
        let key_attribute = update_item.key.partition_key.name.clone();
        let key: common::Item = update_item.key.try_into()?;
        let operation = common::expression::build_update_expression(update_item.fields)?;
        let extra: Option<common::ExpressionInput> = update_item
            .condition
            .map(|condition| condition.try_into())
            .transpose()?;
        if let Some(extra) = &extra {
            let conflict = operation
                .expression_attribute_values
                .keys()
                .find(|placeholder| extra.expression_attribute_values.contains_key(*placeholder));
            if let Some(placeholder) = conflict {
                return Err(error::InvalidData::PlaceholderConflict(
                    placeholder.clone(),
                ));
            }
        }
        let condition = common::expression::build_existence_condition(&key_attribute, true, extra);
        write_input.set_condition(condition);
        let update_expression = write_input.merge_expression(operation);
        let operation = Self {
            key,
            update_expression,
            write_input,
        };
        Ok(operation)
    }
}

impl<T: Serialize> UpdateItem<T> {
    fn call_context(&self) -> error::CallContext {
        error::CallContext::default()
            .with("key", &self.key)
            .with("table_name", &self.table_name)
            .with("fields", &self.fields)
            .with("condition", &self.condition)
    }

    /// Execute the update item operation.
    ///
    /// A failed condition is reported as
    /// [`error::ErrorCode::ConditionalCheckFailed`]: the item is likely absent
    /// or the caller's condition was false.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "item_access.update_item",
            skip_all,
            fields(table_name = %self.table_name),
            err
        )
    )]
    pub async fn send<S: store::StoreClient + ?Sized>(
        self,
        store: &S,
    ) -> Result<operation::update_item::UpdateItemOutput, error::OperationError> {
        let context = self.call_context();
        let update_item: UpdateItemInput = match self.try_into() {
            Ok(update_item) => update_item,
            Err(err) => return Err(error::OperationError::invalid_data(err, context)),
        };
        store.update_item(update_item).await.map_err(|failure| {
            error::OperationError::from_store(
                failure,
                error::ErrorCode::ConditionalCheckFailed,
                context,
            )
        })
    }
}
