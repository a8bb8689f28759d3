//! In-memory store client for tests.
//!
//! Items are addressed by the configured key attribute. Conditions are
//! evaluated clause by clause: `attribute_exists(a)` and
//! `attribute_not_exists(a)` are checked against the stored item, any other
//! clause is taken as true.

use crate::{common, error, read, store, write};

use async_trait::async_trait;
use aws_sdk_dynamodb::operation;
use std::{
    collections,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    key_attribute: String,
    tables: Mutex<collections::HashMap<String, Vec<common::Item>>>,
    calls: AtomicUsize,
    failure: Mutex<Option<String>>,
    last_query: Mutex<Option<read::query::QueryInput>>,
}

impl MemoryStore {
    pub(crate) fn new(key_attribute: &str) -> Self {
        Self {
            key_attribute: key_attribute.to_string(),
            ..Default::default()
        }
    }

    /// Number of store calls made so far.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Makes every following call fail with a service error carrying `code`.
    pub(crate) fn fail_with(&self, code: &str) {
        *self.failure.lock().unwrap() = Some(code.to_string());
    }

    pub(crate) fn last_query(&self) -> Option<read::query::QueryInput> {
        self.last_query.lock().unwrap().clone()
    }

    fn begin(&self) -> Result<(), error::StoreFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().clone() {
            Some(code) => Err(error::StoreFailure::Service {
                code,
                message: "injected failure".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn position(&self, items: &[common::Item], key: &common::Item) -> Option<usize> {
        let value = key.get(&self.key_attribute)?;
        items
            .iter()
            .position(|item| item.get(&self.key_attribute) == Some(value))
    }

    fn check(
        condition: Option<&str>,
        existing: Option<&common::Item>,
    ) -> Result<(), error::StoreFailure> {
        let Some(condition) = condition else {
            return Ok(());
        };
        for clause in condition.split(", ") {
            let holds = if let Some(name) = clause
                .strip_prefix("attribute_not_exists(")
                .and_then(|rest| rest.strip_suffix(')'))
            {
                existing.is_none_or(|item| !item.contains_key(name))
            } else if let Some(name) = clause
                .strip_prefix("attribute_exists(")
                .and_then(|rest| rest.strip_suffix(')'))
            {
                existing.is_some_and(|item| item.contains_key(name))
            } else {
                true
            };
            if !holds {
                return Err(error::StoreFailure::ConditionalCheckFailed(format!(
                    "condition `{clause}` failed"
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl store::StoreClient for MemoryStore {
    async fn put_item(
        &self,
        input: write::put_item::PutItemInput,
    ) -> Result<operation::put_item::PutItemOutput, error::StoreFailure> {
        self.begin()?;
        let mut tables = self.tables.lock().unwrap();
        let items = tables.entry(input.write_input.table_name).or_default();
        let position = self.position(items, &input.item);
        Self::check(
            input.write_input.condition_expression.as_deref(),
            position.map(|position| &items[position]),
        )?;
        match position {
            Some(position) => items[position] = input.item,
            None => items.push(input.item),
        }
        Ok(operation::put_item::PutItemOutput::builder().build())
    }

    async fn update_item(
        &self,
        input: write::update_item::UpdateItemInput,
    ) -> Result<operation::update_item::UpdateItemOutput, error::StoreFailure> {
        self.begin()?;
        let mut tables = self.tables.lock().unwrap();
        let items = tables.entry(input.write_input.table_name).or_default();
        let position = self.position(items, &input.key);
        Self::check(
            input.write_input.condition_expression.as_deref(),
            position.map(|position| &items[position]),
        )?;
        let values = input
            .write_input
            .expression_attribute_values
            .unwrap_or_default();
        let assignments = input.update_expression.trim_start_matches("set ");
        let mut updated = match position {
            Some(position) => items[position].clone(),
            None => input.key.clone(),
        };
        for assignment in assignments.split(", ") {
            if let Some((name, placeholder)) = assignment.split_once(" = ") {
                if let Some(value) = values.get(placeholder) {
                    updated.insert(name.to_string(), value.clone());
                }
            }
        }
        match position {
            Some(position) => items[position] = updated,
            None => items.push(updated),
        }
        Ok(operation::update_item::UpdateItemOutput::builder().build())
    }

    async fn delete_item(
        &self,
        input: write::delete_item::DeleteItemInput,
    ) -> Result<operation::delete_item::DeleteItemOutput, error::StoreFailure> {
        self.begin()?;
        let mut tables = self.tables.lock().unwrap();
        let items = tables.entry(input.write_input.table_name).or_default();
        let position = self.position(items, &input.key);
        Self::check(
            input.write_input.condition_expression.as_deref(),
            position.map(|position| &items[position]),
        )?;
        if let Some(position) = position {
            items.remove(position);
        }
        Ok(operation::delete_item::DeleteItemOutput::builder().build())
    }

    async fn get_item(
        &self,
        input: read::get_item::GetItemInput,
    ) -> Result<operation::get_item::GetItemOutput, error::StoreFailure> {
        self.begin()?;
        let tables = self.tables.lock().unwrap();
        let item = tables.get(&input.table_name).and_then(|items| {
            self.position(items, &input.key)
                .map(|position| items[position].clone())
        });
        Ok(operation::get_item::GetItemOutput::builder()
            .set_item(item)
            .build())
    }

    async fn query(
        &self,
        input: read::query::QueryInput,
    ) -> Result<operation::query::QueryOutput, error::StoreFailure> {
        self.begin()?;
        *self.last_query.lock().unwrap() = Some(input.clone());
        let equality = input
            .key_condition_expression
            .split_once(" = ")
            .and_then(|(name, placeholder)| {
                let name = input
                    .expression_attribute_names
                    .get(name)
                    .map(String::as_str)
                    .unwrap_or(name);
                input
                    .expression_attribute_values
                    .get(placeholder)
                    .map(|value| (name.to_string(), value.clone()))
            });
        let tables = self.tables.lock().unwrap();
        let items: Vec<common::Item> = match (tables.get(&input.table_name), equality) {
            (Some(items), Some((name, value))) => items
                .iter()
                .filter(|item| item.get(&name) == Some(&value))
                .cloned()
                .collect(),
            _ => Vec::new(),
        };
        Ok(operation::query::QueryOutput::builder()
            .count(items.len() as i32)
            .set_items(Some(items))
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::types;
    use rstest::rstest;

    fn item(id: &str) -> common::Item {
        collections::HashMap::from([("id".to_string(), types::AttributeValue::S(id.to_string()))])
    }

    #[rstest]
    #[case::no_condition(None, None, true)]
    #[case::not_exists_on_absent(Some("attribute_not_exists(id)"), None, true)]
    #[case::not_exists_on_present(Some("attribute_not_exists(id)"), Some(item("a")), false)]
    #[case::exists_on_absent(Some("attribute_exists(id)"), None, false)]
    #[case::exists_on_present(Some("attribute_exists(id)"), Some(item("a")), true)]
    #[case::other_clause_ignored(Some("attribute_exists(id), #v = :v"), Some(item("a")), true)]
    fn test_check(
        #[case] condition: Option<&str>,
        #[case] existing: Option<common::Item>,
        #[case] expected: bool,
    ) {
        let actual = MemoryStore::check(condition, existing.as_ref());
        assert_eq!(actual.is_ok(), expected);
    }
}
