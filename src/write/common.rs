use crate::{common, error};

use aws_sdk_dynamodb::types;
use std::collections;

/// Request fields shared by all write operations (Put, Update, Delete).
///
/// Holds the fully resolved condition expression and placeholder maps ready
/// for the store. Empty placeholder maps are left as `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteInput {
    /// Condition evaluated atomically by the store before writing.
    pub condition_expression: Option<String>,
    /// Name placeholders referenced by the condition or update expression.
    pub expression_attribute_names: Option<collections::HashMap<String, String>>,
    /// Value placeholders referenced by the condition or update expression.
    pub expression_attribute_values: Option<collections::HashMap<String, types::AttributeValue>>,
    /// The table to write to.
    pub table_name: String,
}

impl WriteInput {
    pub(crate) fn new(table_name: String) -> Result<Self, error::InvalidData> {
        if table_name.is_empty() {
            return Err(error::InvalidData::EmptyTableName);
        }
        let operation = Self {
            table_name,
            ..Default::default()
        };
        Ok(operation)
    }

    /// Merge an expression operation into this write operation, returning its expression.
    pub(crate) fn merge_expression(&mut self, operation: common::ExpressionInput) -> String {
        operation.merge_into(
            &mut self.expression_attribute_names,
            &mut self.expression_attribute_values,
        )
    }

    /// Set the condition expression, merging its placeholders.
    pub(crate) fn set_condition(&mut self, condition: common::ExpressionInput) {
        let expression = self.merge_expression(condition);
        self.condition_expression = Some(expression).filter(|expression| !expression.is_empty());
    }
}

/// apply common write operation settings to a builder
#[doc(hidden)]
#[macro_export]
macro_rules! apply_write_operation {
    ($builder:expr, $write_operation:expr) => {
        $builder
            .set_condition_expression($write_operation.condition_expression)
            .set_expression_attribute_names($write_operation.expression_attribute_names)
            .set_expression_attribute_values($write_operation.expression_attribute_values)
            .table_name($write_operation.table_name)
    };
}
