use crate::{common, error};

/// Full-table scan.
///
/// Scanning reads every item and filters client side; it is not supported
/// and always fails with [`error::ErrorCode::NotImplemented`] without
/// contacting the store.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Scan {
    /// The table that would be scanned.
    pub table_name: String,
}

impl Scan {
    /// Execute the scan operation.
    pub async fn send(self) -> Result<Vec<common::Item>, error::OperationError> {
        let context = error::CallContext::default().with("table_name", &self.table_name);
        #[cfg(feature = "tracing")]
        tracing::warn!(table_name = %self.table_name, "scan requested but not implemented");
        Err(error::OperationError::not_implemented("scan", context))
    }
}
