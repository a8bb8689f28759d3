use crate::{common, error};

use serde::Serialize;
use serde_dynamo::to_attribute_value;
use std::collections;

const CLAUSE_SEPARATOR: &str = ", ";

/// One attribute to set on an existing item.
///
/// ```rust
/// use dynamodb_item_access::common::expression;
///
/// let field = expression::UpdateField::new("name", "Jane".to_string());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdateField<T> {
    /// The attribute name.
    pub name: String,
    /// The new value.
    pub value: T,
}

impl<T> UpdateField<T> {
    /// Creates an update field.
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A condition in the store's condition grammar, with its placeholders.
///
/// ```rust
/// use dynamodb_item_access::common::expression;
/// use std::collections;
///
/// let condition = expression::ConditionExpression {
///     expression: "#s = :active".to_string(),
///     attribute_names: collections::HashMap::from([("#s".to_string(), "status".to_string())]),
///     attribute_values: collections::HashMap::from([(":active".to_string(), "yes".to_string())]),
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ConditionExpression<T> {
    /// The condition string, e.g. `attribute_exists(id)`.
    pub expression: String,
    /// Name placeholders (`#name`) to real attribute names.
    pub attribute_names: collections::HashMap<String, String>,
    /// Value placeholders (`:name`) to values.
    pub attribute_values: collections::HashMap<String, T>,
}

impl<T> ConditionExpression<T> {
    /// A condition without placeholders.
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            attribute_names: collections::HashMap::new(),
            attribute_values: collections::HashMap::new(),
        }
    }

    /// Adds a name placeholder.
    pub fn with_name(mut self, placeholder: impl Into<String>, name: impl Into<String>) -> Self {
        self.attribute_names.insert(placeholder.into(), name.into());
        self
    }

    /// Adds a value placeholder.
    pub fn with_value(mut self, placeholder: impl Into<String>, value: T) -> Self {
        self.attribute_values.insert(placeholder.into(), value);
        self
    }
}

impl<T: Serialize> TryFrom<ConditionExpression<T>> for common::ExpressionInput {
    type Error = error::InvalidData;

    fn try_from(condition: ConditionExpression<T>) -> Result<Self, Self::Error> {
        let mut expression_attribute_values =
            collections::HashMap::with_capacity(condition.attribute_values.len());
        for (placeholder, value) in condition.attribute_values {
            let value = to_attribute_value(value)?;
            expression_attribute_values.insert(placeholder, value);
        }
        let operation = Self {
            expression: condition.expression,
            expression_attribute_names: condition.attribute_names,
            expression_attribute_values,
        };
        Ok(operation)
    }
}

/// Builds `set a = :a, b = :b, ...` from `fields`, in order.
///
/// Repeated names produce repeated clauses but a single value placeholder
/// holding the last value.
///
/// ```rust
/// use dynamodb_item_access::common::expression;
///
/// let operation = expression::build_update_expression(vec![
///     expression::UpdateField::new("a", 1),
///     expression::UpdateField::new("b", 2),
/// ])
/// .unwrap();
/// assert_eq!(operation.expression, "set a = :a, b = :b");
/// ```
pub fn build_update_expression<T: Serialize>(
    fields: Vec<UpdateField<T>>,
) -> Result<common::ExpressionInput, error::InvalidData> {
    if fields.is_empty() {
        return Err(error::InvalidData::NoUpdateFields);
    }
    let mut operations = Vec::with_capacity(fields.len());
    for (position, field) in fields.into_iter().enumerate() {
        if field.name.is_empty() {
            return Err(error::InvalidData::MissingFieldName(position));
        }
        let value_placeholder = format!(":{}", field.name);
        let value = to_attribute_value(field.value)?;
        let operation = common::ExpressionInput {
            expression: format!("{} = {value_placeholder}", field.name),
            expression_attribute_values: collections::HashMap::from([(value_placeholder, value)]),
            ..Default::default()
        };
        operations.push(operation);
    }
    let mut operation = common::ExpressionInput::merge(CLAUSE_SEPARATOR, operations);
    operation.expression = format!("set {}", operation.expression);
    Ok(operation)
}

/// Builds the existence predicate on `key_attribute`, optionally followed by `extra`.
///
/// ```rust
/// use dynamodb_item_access::common::expression;
///
/// let operation = expression::build_existence_condition("id", false, None);
/// assert_eq!(operation.expression, "attribute_not_exists(id)");
/// ```
pub fn build_existence_condition(
    key_attribute: &str,
    require_exists: bool,
    extra: Option<common::ExpressionInput>,
) -> common::ExpressionInput {
    let expression = if require_exists {
        format!("attribute_exists({key_attribute})")
    } else {
        format!("attribute_not_exists({key_attribute})")
    };
    let base = common::ExpressionInput {
        expression,
        ..Default::default()
    };
    match extra {
        Some(extra) => common::ExpressionInput::merge(CLAUSE_SEPARATOR, vec![base, extra]),
        None => base,
    }
}
