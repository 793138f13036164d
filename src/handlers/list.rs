use crate::error::{ApiError, ErrorResponse};
use crate::models::PetResponse;
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};

/// GET /pets handler - List every pet
///
/// Returns all stored pets ordered by id, each with its derived `dogAge`.
/// There is no filtering or pagination.
#[utoipa::path(
    get,
    path = routes::PETS,
    responses(
        (status = 200, description = "All pets", body = Vec<PetResponse>),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "pets"
)]
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<PetResponse>>), ApiError> {
    let pets = state.pets.list().await?;

    tracing::info!("Listed {} pets", pets.len());
    Ok((StatusCode::OK, Json(pets)))
}
