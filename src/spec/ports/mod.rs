//! Port contracts for the specification client.
//!
//! Ports define infrastructure-agnostic interfaces used by the store.

pub mod gateway;

pub use gateway::{GatewayError, GatewayResult, SpecGateway};
