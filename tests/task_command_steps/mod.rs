//! Step definitions for command scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
