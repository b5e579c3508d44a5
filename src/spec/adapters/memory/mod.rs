//! In-memory adapters.

mod gateway;

pub use gateway::{GatewayOperation, InMemorySpecGateway};
