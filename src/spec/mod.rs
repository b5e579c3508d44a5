//! Specification generation, editing and export.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types, the task normalizer and the Markdown export in [`domain`]
//! - The remote service contract in [`ports`]
//! - HTTP and in-memory gateways in [`adapters`]
//! - The specification store and the task board engine in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
