//! Beacon domain crate.
//!
//! Dependency-light building blocks shared by the database layer and the
//! API server: command/device enums, push-payload construction, input
//! validation, and the domain error type. No I/O lives here.

pub mod command;
pub mod error;
pub mod types;
pub mod validate;
