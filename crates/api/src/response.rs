//! Shared response envelope types for read endpoints.
//!
//! Dispatch and registration endpoints return their own contract shapes
//! (`{"success": true, ...}`); list/get endpoints wrap payloads in the
//! standard `{ "data": ... }` envelope.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
