use crate::error::{ApiError, ErrorResponse};
use crate::models::PetResponse;
use crate::routes;
use crate::service::PetError;
use crate::state::AppState;
use axum::{Json, extract::Path, extract::State, http::StatusCode};

/// GET /pets/:id handler - Retrieve a pet with its derived dog age
#[utoipa::path(
    get,
    path = routes::PET_ITEM,
    params(
        ("id" = String, Path, description = "Pet id")
    ),
    responses(
        (status = 200, description = "Pet found", body = PetResponse),
        (status = 404, description = "Pet not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "pets"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<PetResponse>), ApiError> {
    match state.pets.find(&id).await {
        Ok(pet) => {
            tracing::info!("Successfully retrieved pet with id: {}", id);
            Ok((StatusCode::OK, Json(pet)))
        }
        Err(PetError::NotFound(_)) => {
            tracing::info!("Pet not found with id: {}", id);
            Err(ApiError::PetNotFound(id))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorResponse;
    use crate::handlers::test_support::{create_pet, decode, send, test_app};
    use crate::models::PetResponse;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_get_success() {
        let app = test_app();
        create_pet(&app, "test123", "Test", 2).await;

        let (status, body) = send(&app, "GET", "/pets/test123", None).await;

        assert_eq!(status, StatusCode::OK);
        let pet: PetResponse = decode(&body);
        assert_eq!(pet.id, "test123");
        assert_eq!(pet.name, "TEST");
        assert_eq!(pet.age, 2);
        assert_eq!(pet.dog_age, Some(14));
    }

    #[tokio::test]
    async fn test_get_zero_age() {
        let app = test_app();
        create_pet(&app, "puppy", "Puppy", 0).await;

        let (status, body) = send(&app, "GET", "/pets/puppy", None).await;

        assert_eq!(status, StatusCode::OK);
        let raw: serde_json::Value = decode(&body);
        assert_eq!(raw["dogAge"], 0);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let app = test_app();

        let (status, body) = send(&app, "GET", "/pets/123test", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ErrorResponse = decode(&body);
        assert!(error.error.contains("Pet not found"));
        assert!(error.error.contains("123test"));
    }

    #[tokio::test]
    async fn test_unknown_paths_are_not_found() {
        let app = test_app();

        for uri in ["/pet", "/blah", "/"] {
            let (status, _) = send(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", uri);
        }
    }
}
