//! Store backend implementations

/// In-process store backed by `DashMap`
pub mod memory;
/// No-op store for testing
pub mod null;
/// Redis-backed distributed store
pub mod redis;

pub use memory::MemoryStoreProvider;
pub use null::NullStoreProvider;
pub use redis::RedisStoreProvider;
