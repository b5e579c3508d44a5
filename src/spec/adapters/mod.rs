//! Gateway adapters: HTTP for the real service, in-memory for tests.

pub mod http;
pub mod memory;
