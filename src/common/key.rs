use crate::{common, error};

use aws_sdk_dynamodb::types;
use serde::Serialize;
use serde_dynamo::to_attribute_value;

/// Whether `value` cannot address an item: null, an empty string or an empty binary.
pub(crate) fn is_empty_key_value(value: &types::AttributeValue) -> bool {
    match value {
        types::AttributeValue::Null(_) => true,
        types::AttributeValue::S(value) => value.is_empty(),
        types::AttributeValue::B(value) => value.as_ref().is_empty(),
        _ => false,
    }
}

/// A single key attribute.
///
/// ```rust
/// use dynamodb_item_access::common::key;
///
/// let attribute = key::KeyAttribute {
///     name: "id".to_string(),
///     value: "1".to_string(),
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct KeyAttribute<T> {
    /// The attribute name.
    pub name: String,
    /// The attribute value.
    pub value: T,
}

/// Address of a single item: the partition key and, for composite tables, the sort key.
///
/// ```rust
/// use dynamodb_item_access::common::key;
///
/// let key = key::ItemKey::partition("id", "1".to_string()).with_sort_key("version", "2".to_string());
/// assert_eq!(key.partition_key.name, "id");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ItemKey<T> {
    /// The partition key.
    pub partition_key: KeyAttribute<T>,
    /// The sort key, only for tables with composite primary keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<KeyAttribute<T>>,
}

impl<T> ItemKey<T> {
    /// Key made of a partition key only.
    pub fn partition(name: impl Into<String>, value: T) -> Self {
        Self {
            partition_key: KeyAttribute {
                name: name.into(),
                value,
            },
            sort_key: None,
        }
    }

    /// Adds a sort key.
    pub fn with_sort_key(mut self, name: impl Into<String>, value: T) -> Self {
        self.sort_key = Some(KeyAttribute {
            name: name.into(),
            value,
        });
        self
    }
}

fn to_key_entry<T: Serialize>(
    attribute: KeyAttribute<T>,
) -> Result<(String, types::AttributeValue), error::InvalidData> {
    if attribute.name.is_empty() {
        return Err(error::InvalidData::EmptyKeyName);
    }
    let value = to_attribute_value(attribute.value)?;
    if is_empty_key_value(&value) {
        return Err(error::InvalidData::EmptyKeyValue(attribute.name));
    }
    Ok((attribute.name, value))
}

impl<T: Serialize> TryFrom<ItemKey<T>> for common::Item {
    type Error = error::InvalidData;

    fn try_from(key: ItemKey<T>) -> Result<Self, Self::Error> {
        let mut keys = Self::from([to_key_entry(key.partition_key)?]);
        if let Some(sort_key) = key.sort_key {
            let (name, value) = to_key_entry(sort_key)?;
            keys.insert(name, value);
        }
        Ok(keys)
    }
}
