//! Domain Layer - Gateguard
//!
//! Core types and port contracts for the access-control and request-shaping
//! layer that guards a multi-tenant API gateway. This crate has no I/O
//! dependencies; backends and adapters implement the ports defined here.
//!
//! ## Contents
//!
//! - `error` - the gateway error taxonomy and wire envelope
//! - `value_objects` - identities, claims, permissions, calls, fingerprints
//! - `ports` - boundary contracts (store backend, token authority, executor)
//! - `constants` - key prefixes, default role table, default limits

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{AuthRejection, Error, ErrorEnvelope, Result};
pub use ports::{OperationExecutor, StoreProvider, TokenAuthority, WindowAdmission};
pub use value_objects::{
    CacheClass, CallOutcome, Claims, Fingerprint, Grant, Identity, InboundCall, OperationSpec,
    Permission,
};
