//! Response envelopes.
//!
//! Successful responses are wrapped as `{ "data": ... }`; paginated lists
//! add a `pagination` block.

use serde::Serialize;
use wayfarer_core::pagination::PageInfo;

/// Standard `{ "data": T }` envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "pagination": { page, limit, total, total_pages } }`.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}
