//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - API-facing serializable views (camelCase, nested sub-records)
//! - Deserialize DTOs for writes

pub mod command;
pub mod device;
