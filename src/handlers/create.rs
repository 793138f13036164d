use crate::error::{ApiError, ErrorResponse};
use crate::models::{PetRequest, PetResponse};
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};

/// POST /pets handler - Create or replace a pet
///
/// The stored name is upper-cased. The response omits `dogAge`.
#[utoipa::path(
    post,
    path = routes::PETS,
    request_body = PetRequest,
    responses(
        (status = 200, description = "Pet stored", body = PetResponse),
        (status = 400, description = "Missing id or name, negative age, or invalid JSON", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "pets"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<PetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PetResponse>), ApiError> {
    let Json(request) = payload?;

    let pet = state.pets.create(request).await?;

    tracing::info!("Successfully stored pet with id: {}", pet.id);
    Ok((StatusCode::OK, Json(PetResponse::from(pet))))
}
