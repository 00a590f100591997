//! OpenAPI documentation configuration.
//!
//! Served through Swagger UI at `/docs`.

use utoipa::OpenApi;

use crate::api::handlers::cake_handler;
use crate::domain::Cake;
use crate::errors::{ErrorBody, ErrorResponse, FieldError};
use crate::types::{CreatedResponse, MessageResponse};

/// OpenAPI documentation for the cake store
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cake Store API",
        version = "0.1.0",
        description = "CRUD over cakes with filtering and pagination"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        cake_handler::list_cakes,
        cake_handler::get_cake,
        cake_handler::create_cake,
        cake_handler::update_cake,
        cake_handler::delete_cake,
    ),
    components(
        schemas(
            Cake,
            cake_handler::CreateCakeRequest,
            cake_handler::UpdateCakeRequest,
            CreatedResponse,
            MessageResponse,
            ErrorResponse,
            ErrorBody,
            FieldError,
        )
    ),
    tags(
        (name = "Cakes", description = "Cake catalogue operations")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_cake_paths() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/cakes"));
        assert!(doc.paths.paths.contains_key("/cakes/{id}"));
    }
}
