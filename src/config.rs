//! Connection and table configuration.

use std::env;

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "eu-west-1";

/// Partition key attribute used when none is configured.
pub const DEFAULT_KEY_ATTRIBUTE: &str = "id";

/// Configuration held by one engine instance.
///
/// ```rust
/// use dynamodb_item_access::config::Config;
///
/// let mut config = Config::default();
/// config.set_region("us-east-1");
/// config.set_region("");
/// assert_eq!(config.region(), "us-east-1");
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    region: String,
    key_attribute: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            key_attribute: DEFAULT_KEY_ATTRIBUTE.to_string(),
        }
    }
}

impl Config {
    /// Reads `AWS_REGION` and `DYNAMODB_KEY_ATTRIBUTE`, falling back to the defaults
    /// for variables that are unset or empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(region) = env::var("AWS_REGION") {
            config.set_region(region);
        }
        if let Ok(key_attribute) = env::var("DYNAMODB_KEY_ATTRIBUTE") {
            config.set_key_attribute(key_attribute);
        }
        config
    }

    /// The region store clients are built for.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// The table's partition key attribute.
    pub fn key_attribute(&self) -> &str {
        &self.key_attribute
    }

    /// Sets the region. An empty region is ignored and the previous one kept.
    pub fn set_region(&mut self, region: impl Into<String>) {
        let region = region.into();
        if region.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!(region = %self.region, "empty region ignored, keeping previous region");
            return;
        }
        self.region = region;
    }

    /// Sets the partition key attribute. An empty name is ignored.
    pub fn set_key_attribute(&mut self, key_attribute: impl Into<String>) {
        let key_attribute = key_attribute.into();
        if key_attribute.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                key_attribute = %self.key_attribute,
                "empty key attribute ignored, keeping previous key attribute"
            );
            return;
        }
        self.key_attribute = key_attribute;
    }

    /// Builder form of [`Config::set_region`].
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.set_region(region);
        self
    }

    /// Builder form of [`Config::set_key_attribute`].
    pub fn with_key_attribute(mut self, key_attribute: impl Into<String>) -> Self {
        self.set_key_attribute(key_attribute);
        self
    }
}
