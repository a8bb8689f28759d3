//! Read operations for retrieving items from DynamoDB tables.
//!
//! This module provides operations for reading data from DynamoDB:
//! - Getting individual items by primary key
//! - Querying items with key conditions, on the table or a secondary index
//! - Scanning, which is deliberately unsupported

/// Get item operation for retrieving a single item by primary key.
pub mod get_item;

/// Query operation for retrieving items with key conditions.
pub mod query;

/// Scan operation placeholder.
pub mod scan;
