//! Step definitions for specification workflow scenarios.

mod given;
mod then;
mod when;
pub mod world;
