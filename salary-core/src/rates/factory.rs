use std::collections::HashMap;

use async_trait::async_trait;

use super::provider::{RateConfig, RateError, RateProvider};

/// One implementation per rate backend.
///
/// Each backend crate exports a unit struct implementing this trait that is
/// registered with a [`RateProviderRegistry`] at startup.
#[async_trait]
pub trait RateProviderFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Builds a ready-to-use provider from `config`.
    async fn create(
        &self,
        config: &RateConfig,
    ) -> Result<Box<dyn RateProvider>, RateError>;
}

/// Registry of [`RateProviderFactory`] instances, keyed by backend name.
pub struct RateProviderRegistry {
    factories: HashMap<&'static str, Box<dyn RateProviderFactory>>,
}

impl RateProviderRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a backend factory, replacing any factory with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn RateProviderFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatches to the factory matching `config.backend`.
    ///
    /// # Errors
    /// * [`RateError::Configuration`] when no factory is registered for the
    ///   requested backend.
    /// * Any error the chosen factory returns.
    pub async fn create(
        &self,
        config: &RateConfig,
    ) -> Result<Box<dyn RateProvider>, RateError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                RateError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for RateProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
