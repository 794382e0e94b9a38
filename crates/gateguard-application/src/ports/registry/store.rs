//! Store Provider Registry
//!
//! Auto-registration system for store backends. Providers register
//! themselves via a `linkme` distributed slice and are discovered at
//! runtime by name, so a new backend can be added without modifying this
//! crate.

use std::collections::HashMap;
use std::sync::Arc;

use gateguard_domain::ports::StoreProvider;

/// Configuration for store provider creation.
///
/// Contains the options a store backend might need. Providers use what
/// they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct StoreProviderConfig {
    /// Provider name (e.g. "memory", "redis", "null")
    pub provider: String,
    /// Connection URI (for networked stores)
    pub uri: Option<String>,
    /// Namespace prefix for keys
    pub namespace: Option<String>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl StoreProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Add extra configuration
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Registry entry for store providers.
///
/// Each backend registers one of these with
/// `#[linkme::distributed_slice(STORE_PROVIDERS)]`.
pub struct StoreProviderEntry {
    /// Unique provider name (e.g. "memory", "redis", "null")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instances
    pub factory: fn(&StoreProviderConfig) -> Result<Arc<dyn StoreProvider>, String>,
}

/// Distributed slice store backends register into at link time
#[linkme::distributed_slice]
pub static STORE_PROVIDERS: [StoreProviderEntry] = [..];

/// Resolve a store provider by name from the registry.
///
/// # Arguments
/// * `config` - Configuration containing provider name and settings
///
/// # Returns
/// * `Ok(Arc<dyn StoreProvider>)` - Created provider instance
/// * `Err(String)` - Provider not found or creation failed
pub fn resolve_store_provider(
    config: &StoreProviderConfig,
) -> Result<Arc<dyn StoreProvider>, String> {
    for entry in STORE_PROVIDERS {
        if entry.name == config.provider {
            return (entry.factory)(config);
        }
    }

    let available: Vec<&str> = STORE_PROVIDERS.iter().map(|entry| entry.name).collect();
    Err(format!(
        "Unknown store provider '{}'. Available providers: {:?}",
        config.provider, available
    ))
}

/// List all registered store providers as (name, description) pairs.
///
/// Useful for CLI help and admin surfaces.
pub fn list_store_providers() -> Vec<(&'static str, &'static str)> {
    STORE_PROVIDERS
        .iter()
        .map(|entry| (entry.name, entry.description))
        .collect()
}
