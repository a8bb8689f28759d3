//! Write operations for modifying items in DynamoDB tables.
//!
//! This module provides operations for writing data to DynamoDB:
//! - Creating items, optionally refusing to replace an existing one
//! - Setting attributes on items that must already exist
//! - Deleting items under an explicit precondition

/// Common request fields for write operations.
pub mod common;

/// Delete item operation for removing items from tables.
pub mod delete_item;

/// Put item operation for creating or replacing items.
pub mod put_item;

/// Update item operation for modifying existing items.
pub mod update_item;
