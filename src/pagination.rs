//! Offset/limit to page-descriptor translation shared by the product and
//! order listings.

use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Cursor metadata returned alongside a result page. `next` and `previous`
/// are offsets rendered as strings, serialized as explicit nulls when
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageMeta {
    pub next: Option<String>,
    pub limit: i64,
    pub previous: Option<String>,
}

/// Clamp raw query parameters into their allowed ranges
/// (limit 1..=100, offset >= 0).
pub fn clamp(limit: i64, offset: i64) -> (i64, i64) {
    (limit.clamp(1, MAX_LIMIT), offset.max(0))
}

/// Build the page descriptor for a page of `limit` items starting at
/// `offset`, given the total count of the same filtered query.
///
/// The count may be stale by the time the page query runs; that race is
/// accepted, no isolation is promised.
pub fn page_meta(limit: i64, offset: i64, total_count: i64) -> PageMeta {
    // Saturating: the offset is client-supplied and may sit near i64::MAX.
    let end = offset.saturating_add(limit);
    let next = if end < total_count {
        Some(end.to_string())
    } else {
        None
    };
    let previous = if offset > 0 {
        Some((offset - limit).to_string())
    } else {
        None
    };
    PageMeta {
        next,
        limit,
        previous,
    }
}
