//! `SpecForge`: client core for AI-assisted product specifications.
//!
//! A user describes a feature, the remote service generates a structured
//! specification (overview, user stories, categorized tasks, risks), and the
//! user reviews, edits and exports it. This crate holds the client side of
//! that flow.
//!
//! # Architecture
//!
//! `SpecForge` follows hexagonal architecture principles:
//!
//! - **Domain**: Pure specification model, task normalization and export
//! - **Ports**: Abstract trait interface to the remote service
//! - **Adapters**: HTTP and in-memory implementations of the port
//! - **Services**: The specification store and the task board engine
//!
//! # Modules
//!
//! - [`spec`]: Specification state, task board and export
//! - [`config`]: Environment-driven client settings
//! - [`telemetry`]: Tracing subscriber setup for binaries

pub mod config;
pub mod spec;
pub mod telemetry;
