//! Store Backend Providers - Gateguard
//!
//! Concrete implementations of the
//! [`StoreProvider`](gateguard_domain::ports::StoreProvider) port:
//!
//! - **memory** - `DashMap`-backed in-process store for single-instance
//!   and test deployments
//! - **redis** - distributed store for multi-instance deployments
//! - **null** - no-op store (always miss, always admit) for testing
//!
//! Each provider registers itself into the application-layer registry via
//! `linkme`, so linking this crate is enough to make the backends
//! resolvable by name.

pub mod store;

pub use store::{MemoryStoreProvider, NullStoreProvider, RedisStoreProvider};
