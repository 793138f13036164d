use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{PetRequest, PetResponse};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "rust-spanner-pets API",
        version = "1.0.0",
        description = "A pet record service backed by Google Cloud Spanner"
    ),
    paths(
        handlers::health::health_handler,
        handlers::create::create_handler,
        handlers::get::get_handler,
        handlers::list::list_handler,
        handlers::update::update_handler,
        handlers::delete::delete_handler
    ),
    components(
        schemas(
            PetRequest,
            PetResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "pets", description = "Pet record operations")
    )
)]
pub struct ApiDoc;
