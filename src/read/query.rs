use crate::{common, error, store};

use aws_sdk_dynamodb::types;
use serde::Serialize;
use std::collections;

/// Query request document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryInput {
    /// Key condition in the store's grammar.
    pub key_condition_expression: String,
    /// Name placeholders referenced by the key condition.
    pub expression_attribute_names: collections::HashMap<String, String>,
    /// Value placeholders referenced by the key condition.
    pub expression_attribute_values: collections::HashMap<String, types::AttributeValue>,
    /// Secondary index to query. `None` queries the table's primary index.
    pub index_name: Option<String>,
    /// The table to read from.
    pub table_name: String,
}

/// Query operation.
///
/// Conditions may only reference attributes of the queried index; this is
/// left to the store to enforce. Only the first page of results is returned.
///
/// ```rust,no_run
/// use dynamodb_item_access::{common, read, store};
///
/// # async fn example(store: &impl store::StoreClient) -> Result<(), Box<dyn std::error::Error>> {
/// let query = read::query::Query {
///     key_condition: common::expression::ConditionExpression::new("#o = :o")
///         .with_name("#o", "owner")
///         .with_value(":o", "jane".to_string()),
///     index_name: Some("by-owner".to_string()),
///     table_name: "documents".to_string(),
/// };
/// let items = query.send(store).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query<T> {
    /// The key condition with its placeholders; expression and both maps are mandatory.
    pub key_condition: common::expression::ConditionExpression<T>,
    /// Secondary index to query. `None` or an empty name selects the primary index.
    pub index_name: Option<String>,
    /// The table to read from.
    pub table_name: String,
}

impl<T: Serialize> TryFrom<Query<T>> for QueryInput {
    type Error = error::InvalidData;

    fn try_from(query: Query<T>) -> Result<Self, Self::Error> {
        if query.table_name.is_empty() {
            return Err(error::InvalidData::EmptyTableName);
        }
        if query.key_condition.expression.is_empty() {
            return Err(error::InvalidData::EmptyArgument("key condition expression"));
        }
        if query.key_condition.attribute_names.is_empty() {
            return Err(error::InvalidData::EmptyArgument("attribute names"));
        }
        if query.key_condition.attribute_values.is_empty() {
            return Err(error::InvalidData::EmptyArgument("attribute values"));
        }
        let key_condition: common::ExpressionInput = query.key_condition.try_into()?;
        let operation = Self {
            key_condition_expression: key_condition.expression,
            expression_attribute_names: key_condition.expression_attribute_names,
            expression_attribute_values: key_condition.expression_attribute_values,
            index_name: query.index_name.filter(|index_name| !index_name.is_empty()),
            table_name: query.table_name,
        };
        Ok(operation)
    }
}

impl<T: Serialize> Query<T> {
    fn call_context(&self) -> error::CallContext {
        error::CallContext::default()
            .with("key_condition", &self.key_condition)
            .with("table_name", &self.table_name)
            .with("index_name", &self.index_name)
    }

    /// Execute the query operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "item_access.query",
            skip_all,
            fields(table_name = %self.table_name, index_name = ?self.index_name),
            err
        )
    )]
    pub async fn send<S: store::StoreClient + ?Sized>(
        self,
        store: &S,
    ) -> Result<Vec<common::Item>, error::OperationError> {
        let context = self.call_context();
        let query: QueryInput = match self.try_into() {
            Ok(query) => query,
            Err(err) => return Err(error::OperationError::invalid_data(err, context)),
        };
        let output = store.query(query).await.map_err(|failure| {
            error::OperationError::from_store(failure, error::ErrorCode::DbError, context)
        })?;
        #[cfg(feature = "tracing")]
        if output.last_evaluated_key.is_some() {
            tracing::debug!(count = output.count, "more results available, continuation not followed");
        }
        Ok(output.items.unwrap_or_default())
    }
}
