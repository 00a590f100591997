//! Shared types: request context, pagination, responses.

mod context;
mod pagination;
mod response;

pub use context::RequestContext;
pub use pagination::{Paged, PaginationMeta};
pub use response::{Created, CreatedResponse, MessageResponse};
