//! HTTP handlers.

pub mod command;
pub mod device;
pub mod health;
