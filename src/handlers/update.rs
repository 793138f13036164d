use crate::error::{ApiError, ErrorResponse};
use crate::models::{PetRequest, PetResponse};
use crate::routes;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

/// PUT /pets/update/:id handler - Replace an existing pet's name and age
///
/// An unknown id is reported as 404 before the body is validated. If the pet
/// is deleted between that check and the write, the result is also 404.
#[utoipa::path(
    put,
    path = routes::PET_UPDATE,
    params(
        ("id" = String, Path, description = "Pet id")
    ),
    request_body = PetRequest,
    responses(
        (status = 200, description = "Pet updated", body = PetResponse),
        (status = 400, description = "Missing name, negative age, mismatched id, or invalid JSON", body = ErrorResponse),
        (status = 404, description = "Pet not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "pets"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PetResponse>), ApiError> {
    let Json(request) = payload?;

    let pet = state.pets.update(&id, request).await?;

    tracing::info!("Successfully updated pet with id: {}", id);
    Ok((StatusCode::OK, Json(PetResponse::from(pet))))
}
