//! Common utilities for item access operations.
//!
//! This module provides shared types used across read and write operations,
//! including key handling and expression building.

/// Update and condition expression building.
pub mod expression;

/// Key types for addressing items in DynamoDB tables.
pub mod key;

use aws_sdk_dynamodb::types;
use std::collections;

/// An item as exchanged with the store: attribute name to attribute value.
pub type Item = collections::HashMap<String, types::AttributeValue>;

fn get_expression(left: String, operator: &str, right: String) -> String {
    if left.is_empty() {
        right
    } else if right.is_empty() {
        left
    } else {
        format!("{left}{operator}{right}")
    }
}

/// A built expression together with the placeholders it references.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpressionInput {
    /// The expression string.
    pub expression: String,
    /// Name placeholders (`#name`) to real attribute names.
    pub expression_attribute_names: collections::HashMap<String, String>,
    /// Value placeholders (`:name`) to attribute values.
    pub expression_attribute_values: collections::HashMap<String, types::AttributeValue>,
}

impl ExpressionInput {
    /// Joins expressions with `operator`, merging their placeholders.
    /// Empty expressions are skipped and later placeholders win.
    pub(crate) fn merge(operator: &str, items: Vec<Self>) -> Self {
        let mut operation = Self::default();
        for item in items {
            operation
                .expression_attribute_names
                .extend(item.expression_attribute_names);
            operation
                .expression_attribute_values
                .extend(item.expression_attribute_values);
            operation.expression = get_expression(operation.expression, operator, item.expression);
        }
        operation
    }

    /// Moves the placeholders into request maps and returns the expression.
    /// Empty placeholder maps are never materialized since the store rejects them.
    pub(crate) fn merge_into(
        self,
        names: &mut Option<collections::HashMap<String, String>>,
        values: &mut Option<collections::HashMap<String, types::AttributeValue>>,
    ) -> String {
        if !self.expression_attribute_names.is_empty() {
            names
                .get_or_insert_with(collections::HashMap::new)
                .extend(self.expression_attribute_names);
        }
        if !self.expression_attribute_values.is_empty() {
            values
                .get_or_insert_with(collections::HashMap::new)
                .extend(self.expression_attribute_values);
        }
        self.expression
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn expression(expression: &str, value: Option<(&str, &str)>) -> ExpressionInput {
        ExpressionInput {
            expression: expression.to_string(),
            expression_attribute_values: value
                .map(|(placeholder, value)| {
                    collections::HashMap::from([(
                        placeholder.to_string(),
                        types::AttributeValue::S(value.to_string()),
                    )])
                })
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    #[rstest]
    #[case::empty(vec![], "")]
    #[case::single(vec![expression("a", None)], "a")]
    #[case::skips_empty(
        vec![
            expression("", None),
            expression("a", None),
            expression("", None),
            expression("b", None),
        ],
        "a, b"
    )]
    fn test_merge(#[case] items: Vec<ExpressionInput>, #[case] expected: &str) {
        assert_eq!(ExpressionInput::merge(", ", items).expression, expected);
    }

    #[test]
    fn test_merge_last_value_wins() {
        let merged = ExpressionInput::merge(
            ", ",
            vec![
                expression("a = :a", Some((":a", "first"))),
                expression("a = :a", Some((":a", "second"))),
            ],
        );
        assert_eq!(
            merged.expression_attribute_values,
            collections::HashMap::from([(
                ":a".to_string(),
                types::AttributeValue::S("second".to_string())
            )])
        );
    }

    #[test]
    fn test_merge_into_omits_empty_maps() {
        let mut names = None;
        let mut values = None;
        let expression = expression("a", None).merge_into(&mut names, &mut values);
        assert_eq!(expression, "a");
        assert_eq!(names, None);
        assert_eq!(values, None);
    }

    #[test]
    fn test_merge_into_extends_existing_maps() {
        let mut names = Some(collections::HashMap::from([(
            "#a".to_string(),
            "a".to_string(),
        )]));
        let mut values = None;
        let expression = expression("b = :b", Some((":b", "c"))).merge_into(&mut names, &mut values);
        assert_eq!(expression, "b = :b");
        assert_eq!(names.map(|names| names.len()), Some(1));
        assert_eq!(values.map(|values| values.len()), Some(1));
    }
}
