//! Application Ports
//!
//! Registry contracts through which backend providers plug into the
//! application layer without creating a dependency cycle: providers
//! register themselves into the slices declared here.

/// Provider registries
pub mod registry;

pub use registry::{
    list_store_providers, resolve_store_provider, StoreProviderConfig, StoreProviderEntry,
    STORE_PROVIDERS,
};
