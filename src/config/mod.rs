//! Configuration loading, validation, and hot-reloading.
//!
//! Defines the [`ConfigSource`] trait for pluggable config backends,
//! the [`ConfigResolver`] that falls back to the built-in defaults when
//! no file is present, and the [`ConfigVersion`] enum for change
//! detection. Submodules provide the data model, validation logic, and
//! concrete source implementations.

pub mod model;
pub mod sources;
pub mod validation;

use async_trait::async_trait;

use crate::error::DocgateError;
use model::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigVersion {
    Hash(String),
    Builtin,
}

impl ConfigVersion {
    /// Short form for logs and `/health`.
    #[must_use]
    pub fn short(&self) -> String {
        match self {
            Self::Hash(h) => h.get(..8).unwrap_or(h).to_string(),
            Self::Builtin => "builtin".to_string(),
        }
    }
}

// async_trait is required here because ConfigSource is used as Box<dyn ConfigSource>
// and native async fn in traits does not support dyn dispatch.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn load(&self) -> Result<(Config, ConfigVersion), DocgateError>;
    async fn has_changed(&self, current: &ConfigVersion) -> Result<bool, DocgateError>;
}

/// Serves [`Config::default`] when no config file exists.
pub struct BuiltinSource;

#[async_trait]
impl ConfigSource for BuiltinSource {
    fn name(&self) -> &'static str {
        "builtin"
    }

    async fn load(&self) -> Result<(Config, ConfigVersion), DocgateError> {
        Ok((Config::default(), ConfigVersion::Builtin))
    }

    async fn has_changed(&self, _current: &ConfigVersion) -> Result<bool, DocgateError> {
        Ok(false)
    }
}

pub struct ConfigResolver {
    source: Box<dyn ConfigSource>,
}

impl ConfigResolver {
    #[must_use]
    pub fn new(source: Box<dyn ConfigSource>) -> Self {
        Self { source }
    }

    #[must_use]
    pub fn builtin() -> Self {
        Self::new(Box::new(BuiltinSource))
    }

    pub async fn load(&self) -> Result<(Config, ConfigVersion), DocgateError> {
        self.source.load().await
    }

    #[must_use]
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    #[must_use]
    pub fn source(&self) -> &dyn ConfigSource {
        &*self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builtin_source_serves_defaults() {
        let resolver = ConfigResolver::builtin();
        let (config, version) = resolver.load().await.unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(version, ConfigVersion::Builtin);
        assert_eq!(resolver.source_name(), "builtin");
        assert!(!resolver.source().has_changed(&version).await.unwrap());
    }

    #[test]
    fn short_version_truncates_hash() {
        assert_eq!(ConfigVersion::Hash("0123456789abcdef".into()).short(), "01234567");
        assert_eq!(ConfigVersion::Hash("abc".into()).short(), "abc");
        assert_eq!(ConfigVersion::Builtin.short(), "builtin");
    }
}
