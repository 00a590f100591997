//! Pagination types for list endpoints.

use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::config::{HEADER_PAGINATION_LIMIT, HEADER_PAGINATION_PAGE, HEADER_PAGINATION_ROWS};

/// Pagination metadata sent as response headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationMeta {
    /// Total rows matching the filter
    pub rows: u64,
    /// Number of pages of `limit` rows, ceil(rows / limit)
    pub page: u64,
    /// Effective page size
    pub limit: u64,
}

impl PaginationMeta {
    /// Compute metadata; a zero `limit` reports zero pages.
    pub fn new(rows: u64, limit: u64) -> Self {
        let page = if limit > 0 { rows.div_ceil(limit) } else { 0 };

        Self { rows, page, limit }
    }

    /// Header representation
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in [
            (HEADER_PAGINATION_ROWS, self.rows),
            (HEADER_PAGINATION_PAGE, self.page),
            (HEADER_PAGINATION_LIMIT, self.limit),
        ] {
            headers.insert(HeaderName::from_static(name), HeaderValue::from(value));
        }
        headers
    }
}

/// Paged list response: JSON array body plus pagination headers
#[derive(Debug)]
pub struct Paged<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paged<T> {
    /// Create new paged response
    pub fn new(data: Vec<T>, total: u64, limit: u64) -> Self {
        Self {
            data,
            meta: PaginationMeta::new(total, limit),
        }
    }
}

impl<T: Serialize> IntoResponse for Paged<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, self.meta.headers(), Json(self.data)).into_response()
    }
}
