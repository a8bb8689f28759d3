use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Closed set of failure categories an operation can report.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorCode {
    /// A required argument was missing, empty or malformed. No store call was made.
    InvalidData,
    /// A put without overwrite found an item with the same key.
    ItemExists,
    /// The store rejected the request or the transport failed.
    DbError,
    /// An update's existence or caller condition evaluated to false.
    ConditionalCheckFailed,
    /// The operation is intentionally unimplemented.
    NotImplemented,
}

impl ErrorCode {
    /// Stable textual code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidData => "InvalidData",
            Self::ItemExists => "ItemExists",
            Self::DbError => "DBError",
            Self::ConditionalCheckFailed => "DBError.ConditionalCheckFailedException",
            Self::NotImplemented => "NotImplemented",
        }
    }

    /// Whether the code belongs to the `DBError` family.
    pub fn is_db_error(&self) -> bool {
        matches!(self, Self::DbError | Self::ConditionalCheckFailed)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures detected while building a request.
#[derive(Debug, Error)]
pub enum InvalidData {
    /// The table name was empty.
    #[error("table name must not be empty")]
    EmptyTableName,
    /// The item serialized to a map without attributes.
    #[error("item must contain at least one attribute")]
    EmptyItem,
    /// The item lacks the table's key attribute.
    #[error("item is missing key attribute `{0}`")]
    MissingKeyAttribute(String),
    /// A key attribute had an empty name.
    #[error("key attribute name must not be empty")]
    EmptyKeyName,
    /// A key attribute's value was null, an empty string or an empty binary.
    #[error("key attribute `{0}` must have a non-empty value")]
    EmptyKeyValue(String),
    /// No update fields were supplied.
    #[error("at least one update field is required")]
    NoUpdateFields,
    /// An update field at the given position had an empty name.
    #[error("update field at position {0} has no name")]
    MissingFieldName(usize),
    /// A caller condition and an update field use the same value placeholder.
    #[error("value placeholder `{0}` is used by both the condition and the update fields")]
    PlaceholderConflict(String),
    /// A mandatory expression argument was empty.
    #[error("{0} must not be empty")]
    EmptyArgument(&'static str),
    /// A value could not be converted into a DynamoDB attribute value.
    #[error("failed to convert value: {0}")]
    Serialization(#[from] serde_dynamo::Error),
}

/// Failures reported by a [`crate::store::StoreClient`].
#[derive(Debug, Error)]
pub enum StoreFailure {
    /// The request's condition expression evaluated to false.
    #[error("conditional check failed: {0}")]
    ConditionalCheckFailed(String),
    /// The store rejected the request for another reason.
    #[error("{code}: {message}")]
    Service {
        /// Service error code.
        code: String,
        /// Service error message.
        message: String,
    },
    /// The request never produced a service response.
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Underlying cause attached to an [`OperationError`].
#[derive(Debug, Error)]
pub enum Cause {
    /// Local validation failure.
    #[error(transparent)]
    InvalidData(#[from] InvalidData),
    /// Store-side failure.
    #[error(transparent)]
    Store(#[from] StoreFailure),
}

/// The caller's arguments, echoed back on failure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CallContext(IndexMap<&'static str, serde_json::Value>);

impl CallContext {
    /// Records an argument. Values that cannot be represented as JSON are recorded as `null`.
    pub fn with<V: Serialize + ?Sized>(mut self, name: &'static str, value: &V) -> Self {
        let value = serde_json::to_value(value).unwrap_or_default();
        self.0.insert(name, value);
        self
    }

    /// Returns the recorded argument, if any.
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }

    /// Iterates over the recorded arguments in call order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &serde_json::Value)> {
        self.0.iter().map(|(name, value)| (*name, value))
    }

    /// Number of recorded arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no argument was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Error returned by every item access operation.
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct OperationError {
    /// Failure category.
    pub code: ErrorCode,
    /// Human readable description.
    pub message: String,
    /// Underlying cause, when there is one.
    #[source]
    pub cause: Option<Cause>,
    /// The caller's original arguments.
    pub context: CallContext,
}

impl OperationError {
    pub(crate) fn invalid_data(error: InvalidData, context: CallContext) -> Self {
        Self {
            code: ErrorCode::InvalidData,
            message: error.to_string(),
            cause: Some(error.into()),
            context,
        }
    }

    /// Classifies a store failure. A failed condition is reported as
    /// `on_condition_failed`, everything else as [`ErrorCode::DbError`].
    pub(crate) fn from_store(
        failure: StoreFailure,
        on_condition_failed: ErrorCode,
        context: CallContext,
    ) -> Self {
        let code = match failure {
            StoreFailure::ConditionalCheckFailed(_) => on_condition_failed,
            _ => ErrorCode::DbError,
        };
        let message = match code {
            ErrorCode::ItemExists => "item already exists".to_string(),
            ErrorCode::ConditionalCheckFailed => {
                "item does not exist or condition was not met".to_string()
            }
            _ => failure.to_string(),
        };
        Self {
            code,
            message,
            cause: Some(failure.into()),
            context,
        }
    }

    pub(crate) fn not_implemented(operation: &str, context: CallContext) -> Self {
        Self {
            code: ErrorCode::NotImplemented,
            message: format!("{operation} is not implemented"),
            cause: None,
            context,
        }
    }
}
