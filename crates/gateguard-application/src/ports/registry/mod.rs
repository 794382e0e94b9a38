//! Provider Registries
//!
//! Auto-registration for pluggable backends via `linkme` distributed
//! slices: each provider crate submits an entry at link time and is
//! discovered here at runtime by name.

/// Store backend registry
pub mod store;

pub use store::{
    list_store_providers, resolve_store_provider, StoreProviderConfig, StoreProviderEntry,
    STORE_PROVIDERS,
};
