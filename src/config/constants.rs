//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Page size used when a list request omits `limit` or sends zero
pub const DEFAULT_PAGE_SIZE: u64 = 10;

// Header names are matched case-insensitively; `HeaderName::from_static`
// requires the lowercase form.

/// Response header carrying the total number of matching rows
pub const HEADER_PAGINATION_ROWS: &str = "pagination-rows";

/// Response header carrying the computed page count
pub const HEADER_PAGINATION_PAGE: &str = "pagination-page";

/// Response header carrying the effective page size
pub const HEADER_PAGINATION_LIMIT: &str = "pagination-limit";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default per-request deadline in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Database
// =============================================================================

/// Default database user (for development)
pub const DEFAULT_DB_USER: &str = "root";

/// Default network transport (`tcp` or `unix`)
pub const DEFAULT_DB_NET: &str = "tcp";

/// Default database address (host:port, or socket path for `unix`)
pub const DEFAULT_DB_ADDRESS: &str = "127.0.0.1:3306";

/// Default database name
pub const DEFAULT_DB_NAME: &str = "cake_store";

/// Maximum number of open connections in the pool
pub const DEFAULT_DB_MAX_OPEN_CONNS: u32 = 10;

/// Minimum number of connections kept in the pool
pub const DEFAULT_DB_MIN_CONNS: u32 = 0;

/// Seconds an idle connection is retained before being closed
pub const DEFAULT_DB_CONN_MAX_IDLE_SECS: u64 = 180;

/// Maximum lifetime of a pooled connection in seconds (1 hour)
pub const DEFAULT_DB_CONN_MAX_LIFETIME_SECS: u64 = 3600;

/// Seconds a caller waits for a free connection before failing
pub const DEFAULT_DB_ACQUIRE_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Messages
// =============================================================================

/// Confirmation returned after a successful create
pub const MSG_CAKE_CREATED: &str = "Cake Created";

/// Confirmation returned after a successful update
pub const MSG_CAKE_UPDATED: &str = "Cake Updated";

/// Confirmation returned after a successful delete
pub const MSG_CAKE_DELETED: &str = "Cake Deleted";

/// Summary message for validation failures
pub const MSG_INVALID_DATA: &str = "The given data was invalid.";
