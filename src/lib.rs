#![deny(missing_docs)]
#![deny(warnings)]

//! # DynamoDB Item Access
//!
//! An item access engine for Amazon DynamoDB with conditional create, update,
//! delete, get and query semantics.
//!
//! ## Overview
//!
//! The engine sits between application code and the store:
//! - Validates declarative input before any request leaves the process
//! - Builds `set` update expressions and their value placeholders
//! - Guards creates against clobbering and updates against creating partial items
//! - Classifies store failures into a closed set of [`error::ErrorCode`]s
//!
//! ## Quick Example
//!
//! ```no_run
//! use dynamodb_item_access::{ItemAccess, common, config::Config, error::ErrorCode};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = ItemAccess::connect(Config::default().with_region("eu-west-1")).await;
//!
//! // Fails with `ItemExists` if an item with id "1" is already present.
//! engine.put(json!({"id": "1", "name": "Jane"}), "users", false).await?;
//!
//! // "set name = :name, age = :age", conditioned on "attribute_exists(id)".
//! engine
//!     .update(
//!         common::key::ItemKey::partition("id", json!("1")),
//!         "users",
//!         vec![
//!             common::expression::UpdateField::new("name", json!("Janet")),
//!             common::expression::UpdateField::new("age", json!(30)),
//!         ],
//!         None,
//!     )
//!     .await?;
//!
//! match engine.put(json!({"id": "1"}), "users", false).await {
//!     Err(err) if err.code == ErrorCode::ItemExists => println!("already there"),
//!     other => {
//!         other?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Keys, items and expression building
//! - [`mod@read`] - Read operations (GetItem, Query, Scan)
//! - [`mod@write`] - Write operations (PutItem, UpdateItem, DeleteItem)
//! - [`mod@store`] - The store client capability and its DynamoDB implementation
//! - [`mod@error`] - Error codes and the operation error type
//! - [`mod@config`] - Region and key attribute configuration

/// Common utilities for keys, items and expressions.
pub mod common;

pub mod config;

/// Error codes, validation failures and store failures.
pub mod error;

mod engine;

/// Read operations for retrieving items from DynamoDB tables.
///
/// This module provides operations for:
/// - Getting individual items by key
/// - Querying items with key conditions
/// - Scanning, which reports `NotImplemented`
pub mod read;

pub mod store;

/// Write operations for modifying items in DynamoDB tables.
///
/// This module provides operations for:
/// - Putting new items, optionally refusing to overwrite
/// - Updating attributes of existing items
/// - Deleting items under an explicit condition
pub mod write;

pub use engine::ItemAccess;
