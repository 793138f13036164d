use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::routes;
use crate::state::AppState;

/// Build the HTTP router with every pet route, the health check and the
/// OpenAPI UI.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(routes::HEALTH, get(handlers::health_handler))
        .route(
            routes::PETS,
            post(handlers::create_handler).get(handlers::list_handler),
        )
        .route(routes::PET_ITEM, get(handlers::get_handler))
        .route(routes::PET_UPDATE, put(handlers::update_handler))
        .route(routes::PET_DELETE, delete(handlers::delete_handler))
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
