//! Custom request extractors.

mod request_context;
mod validated_json;
mod validated_query;

pub use validated_json::{ValidatedJson, ValidatedJsonOrDefault};
pub use validated_query::ValidatedQuery;
