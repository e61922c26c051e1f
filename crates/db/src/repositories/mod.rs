//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! a `&PgPool` (reads, reconciliation) or any `PgExecutor` (the dispatch
//! write path, so device transition and command insert can share one
//! transaction).

pub mod command_repo;
pub mod device_repo;

pub use command_repo::CommandRepo;
pub use device_repo::DeviceRepo;
