use crate::{common, error, store};

use serde::{Serialize, de::DeserializeOwned};
use serde_dynamo::from_item;

/// Get item request document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItemInput {
    /// The key of the item to fetch.
    pub key: common::Item,
    /// The table to read from.
    pub table_name: String,
}

/// Result of a get: the store's "no item" is a successful outcome.
#[derive(Clone, Debug, PartialEq)]
pub enum GetOutcome {
    /// The item exists.
    Found(common::Item),
    /// No item has the requested key.
    NotFound,
}

impl GetOutcome {
    /// Whether the item was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The found item, if any.
    pub fn item(&self) -> Option<&common::Item> {
        match self {
            Self::Found(item) => Some(item),
            Self::NotFound => None,
        }
    }

    /// Consumes the outcome, returning the found item, if any.
    pub fn into_item(self) -> Option<common::Item> {
        match self {
            Self::Found(item) => Some(item),
            Self::NotFound => None,
        }
    }

    /// Converts the found item into `T`.
    ///
    /// ```rust
    /// use aws_sdk_dynamodb::types;
    /// use dynamodb_item_access::read::get_item::GetOutcome;
    /// use std::collections;
    ///
    /// #[derive(serde::Deserialize)]
    /// struct User {
    ///     id: String,
    /// }
    ///
    /// let outcome = GetOutcome::Found(collections::HashMap::from([(
    ///     "id".to_string(),
    ///     types::AttributeValue::S("1".to_string()),
    /// )]));
    /// let user: Option<User> = outcome.deserialize().unwrap();
    /// assert_eq!(user.unwrap().id, "1");
    /// ```
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<Option<T>, serde_dynamo::Error> {
        self.into_item().map(|item| from_item(item)).transpose()
    }
}

/// Get item operation.
///
/// ```rust,no_run
/// use dynamodb_item_access::{common, read, store};
///
/// # async fn example(store: &impl store::StoreClient) -> Result<(), Box<dyn std::error::Error>> {
/// let get_item = read::get_item::GetItem {
///     key: common::key::ItemKey::partition("id", "1".to_string()),
///     table_name: "users".to_string(),
/// };
/// if let read::get_item::GetOutcome::Found(item) = get_item.send(store).await? {
///     println!("{item:?}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItem<T> {
    /// The primary key of the item to retrieve.
    pub key: common::key::ItemKey<T>,
    /// The table to read from.
    pub table_name: String,
}

impl<T: Serialize> TryFrom<GetItem<T>> for GetItemInput {
    type Error = error::InvalidData;

    fn try_from(get_item: GetItem<T>) -> Result<Self, Self::Error> {
        if get_item.table_name.is_empty() {
            return Err(error::InvalidData::EmptyTableName);
        }
        let key = get_item.key.try_into()?;
        let operation = Self {
            key,
            table_name: get_item.table_name,
        };
        Ok(operation)
    }
}

impl<T: Serialize> GetItem<T> {
    fn call_context(&self) -> error::CallContext {
        error::CallContext::default()
            .with("key", &self.key)
            .with("table_name", &self.table_name)
    }

    /// Execute the get item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "item_access.get_item",
            skip_all,
            fields(table_name = %self.table_name),
            err
        )
    )]
    pub async fn send<S: store::StoreClient + ?Sized>(
        self,
        store: &S,
    ) -> Result<GetOutcome, error::OperationError> {
        let context = self.call_context();
        let get_item: GetItemInput = match self.try_into() {
            Ok(get_item) => get_item,
            Err(err) => return Err(error::OperationError::invalid_data(err, context)),
        };
        match store.get_item(get_item).await {
            Ok(output) => match output.item {
                Some(item) => Ok(GetOutcome::Found(item)),
                None => Ok(GetOutcome::NotFound),
            },
            Err(failure) => Err(error::OperationError::from_store(
                failure,
                error::ErrorCode::DbError,
                context,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::types;
    use rstest::rstest;
    use serde_json::Value;
    use std::collections;

    #[rstest]
    #[case::partition_key(
        GetItem {
            key: common::key::ItemKey::partition(
                "a",
                Value::String(
                    "b".to_string()
                )
            ),
            table_name: "c".to_string(),
        },
        GetItemInput {
            key: collections::HashMap::from(
                [
                    (
                        "a".to_string(),
                        types::AttributeValue::S(
                            "b".to_string()
                        )
                    ),
                ]
            ),
            table_name: "c".to_string(),
        }
    )]
    #[case::composite_key(
        GetItem {
            key: common::key::ItemKey::partition(
                "a",
                Value::String(
                    "b".to_string()
                )
            ).with_sort_key(
                "d",
                Value::Number(
                    1.into()
                )
            ),
            table_name: "c".to_string(),
        },
        GetItemInput {
            key: collections::HashMap::from(
                [
                    (
                        "a".to_string(),
                        types::AttributeValue::S(
                            "b".to_string()
                        )
                    ),
                    (
                        "d".to_string(),
                        types::AttributeValue::N(
                            "1".to_string()
                        )
                    ),
                ]
            ),
            table_name: "c".to_string(),
        }
    )]
    fn test_get_item_to_get_item_input(
        #[case] get_item: GetItem<Value>,
        #[case] expected: GetItemInput,
    ) {
        let actual: GetItemInput = get_item.try_into().unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_get_item_empty_table_name() {
        let get_item = GetItem {
            key: common::key::ItemKey::partition("a", Value::String("b".to_string())),
            table_name: String::new(),
        };
        let actual: Result<GetItemInput, _> = get_item.try_into();
        assert!(matches!(actual, Err(error::InvalidData::EmptyTableName)));
    }

    #[test]
    fn test_get_outcome_not_found() {
        let outcome = GetOutcome::NotFound;
        assert!(!outcome.is_found());
        assert_eq!(outcome.item(), None);
        assert_eq!(outcome.deserialize::<Value>().unwrap(), None);
    }
}
