use crate::error::{ApiError, ErrorResponse};
use crate::models::PetResponse;
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::Path, extract::State, http::StatusCode};

/// DELETE /pets/delete/:id handler - Remove a pet and return its prior state
#[utoipa::path(
    delete,
    path = routes::PET_DELETE,
    params(
        ("id" = String, Path, description = "Pet id")
    ),
    responses(
        (status = 200, description = "Pet deleted", body = PetResponse),
        (status = 404, description = "Pet not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "pets"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<PetResponse>), ApiError> {
    let pet = state.pets.delete(&id).await?;

    tracing::info!("Successfully deleted pet with id: {}", id);
    Ok((StatusCode::OK, Json(PetResponse::from(pet))))
}
