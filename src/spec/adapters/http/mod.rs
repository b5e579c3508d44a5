//! HTTP adapter for the remote specification service.

mod gateway;
mod session;

pub use gateway::HttpSpecGateway;
pub use session::{AuthSession, LogoutEvent};
