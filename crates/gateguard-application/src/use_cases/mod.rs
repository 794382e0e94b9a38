//! Gateway Use Cases
//!
//! The per-call middleware pipeline and its declarative operation table.

/// Gateway orchestration use case
pub mod gateway;

pub use gateway::{CacheTtls, GatewayService, OperationTable};
