use std::sync::Arc;

use crate::models::{Pet, PetRequest, PetResponse};
use crate::store::{PetStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum PetError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Pet not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for PetError {
    fn from(err: StoreError) -> Self {
        match err {
            // The row vanished between the existence check and the write.
            StoreError::Missing(id) => PetError::NotFound(id),
            other => PetError::Store(other),
        }
    }
}

pub type PetResult<T> = Result<T, PetError>;

/// Convert a pet's age to dog years.
pub fn dog_years(age: i32) -> i64 {
    i64::from(age) * 7
}

/// Check a request body and turn it into the record to persist.
///
/// This is the only place the name and age rules live; the stored name is
/// always upper-cased.
pub fn validate(id: String, request: PetRequest) -> PetResult<Pet> {
    if id.is_empty() {
        return Err(PetError::InvalidInput("id is required".to_string()));
    }

    let name = match request.name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(PetError::InvalidInput("name is required".to_string())),
    };

    if request.age < 0 {
        return Err(PetError::InvalidInput(format!(
            "age cannot be negative, got {}",
            request.age
        )));
    }

    Ok(Pet {
        id,
        name: name.to_uppercase(),
        age: request.age,
    })
}

fn with_dog_age(pet: Pet) -> PetResponse {
    let dog_age = dog_years(pet.age);
    PetResponse {
        dog_age: Some(dog_age),
        ..PetResponse::from(pet)
    }
}

/// Business rules for pets, in front of a [`PetStore`]
#[derive(Clone)]
pub struct PetService {
    store: Arc<dyn PetStore>,
}

impl PetService {
    pub fn new(store: Arc<dyn PetStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, request: PetRequest) -> PetResult<Pet> {
        let id = request.id.clone().unwrap_or_default();
        let pet = validate(id, request)?;

        self.store.put(&pet).await?;
        Ok(pet)
    }

    pub async fn find(&self, id: &str) -> PetResult<PetResponse> {
        self.store
            .get(id)
            .await?
            .map(with_dog_age)
            .ok_or_else(|| PetError::NotFound(id.to_string()))
    }

    pub async fn list(&self) -> PetResult<Vec<PetResponse>> {
        let pets = self.store.scan().await?;
        Ok(pets.into_iter().map(with_dog_age).collect())
    }

    /// Replace the name and age of an existing pet.
    ///
    /// Existence is checked before the body is validated, so an unknown id is
    /// reported as not found even when the body is also invalid.
    pub async fn update(&self, id: &str, request: PetRequest) -> PetResult<Pet> {
        if self.store.get(id).await?.is_none() {
            return Err(PetError::NotFound(id.to_string()));
        }

        if let Some(body_id) = &request.id {
            if body_id != id {
                return Err(PetError::InvalidInput(format!(
                    "body id '{}' does not match path id '{}'",
                    body_id, id
                )));
            }
        }

        let pet = validate(id.to_string(), request)?;
        self.store.put_if_exists(&pet).await?;
        Ok(pet)
    }

    pub async fn delete(&self, id: &str) -> PetResult<Pet> {
        self.store
            .delete(id)
            .await?
            .ok_or_else(|| PetError::NotFound(id.to_string()))
    }

    pub async fn health_check(&self) -> PetResult<()> {
        Ok(self.store.health_check().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryPetStore;
    use async_trait::async_trait;

    fn request(id: Option<&str>, name: Option<&str>, age: i32) -> PetRequest {
        PetRequest {
            id: id.map(str::to_string),
            name: name.map(str::to_string),
            age,
        }
    }

    fn service() -> PetService {
        PetService::new(Arc::new(InMemoryPetStore::new()))
    }

    #[test]
    fn test_dog_years() {
        assert_eq!(dog_years(2), 14);
        assert_eq!(dog_years(0), 0);
        assert_eq!(dog_years(10), 70);
        assert_eq!(dog_years(i32::MAX), i64::from(i32::MAX) * 7);
    }

    #[test]
    fn test_validate_uppercases_name() {
        let pet = validate("rex".to_string(), request(None, Some("Rex the Dog"), 4)).unwrap();
        assert_eq!(pet.name, "REX THE DOG");
        assert_eq!(pet.age, 4);
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let missing_name = validate("rex".to_string(), request(None, None, 1));
        assert!(matches!(missing_name, Err(PetError::InvalidInput(msg)) if msg.contains("name")));

        let empty_name = validate("rex".to_string(), request(None, Some(""), 1));
        assert!(matches!(empty_name, Err(PetError::InvalidInput(_))));

        let negative_age = validate("rex".to_string(), request(None, Some("Rex"), -1));
        assert!(matches!(negative_age, Err(PetError::InvalidInput(msg)) if msg.contains("age")));

        let missing_id = validate(String::new(), request(None, Some("Rex"), 1));
        assert!(matches!(missing_id, Err(PetError::InvalidInput(msg)) if msg.contains("id")));
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let service = service();

        let created = service
            .create(request(Some("rex"), Some("Rex"), 2))
            .await
            .unwrap();
        assert_eq!(created.name, "REX");

        let found = service.find("rex").await.unwrap();
        assert_eq!(found.name, "REX");
        assert_eq!(found.age, 2);
        assert_eq!(found.dog_age, Some(14));
    }

    #[tokio::test]
    async fn test_invalid_create_persists_nothing() {
        let service = service();

        assert!(service.create(request(Some("rex"), None, 2)).await.is_err());
        assert!(service.create(request(Some("rex"), Some("Rex"), -2)).await.is_err());
        assert!(matches!(service.find("rex").await, Err(PetError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_attaches_dog_age() {
        let service = service();
        service.create(request(Some("a"), Some("A"), 0)).await.unwrap();
        service.create(request(Some("b"), Some("B"), 10)).await.unwrap();

        let pets = service.list().await.unwrap();
        let dog_ages: Vec<Option<i64>> = pets.iter().map(|p| p.dog_age).collect();
        assert_eq!(dog_ages, vec![Some(0), Some(70)]);
    }

    #[tokio::test]
    async fn test_update() {
        let service = service();
        service.create(request(Some("rex"), Some("Rex"), 2)).await.unwrap();

        let updated = service
            .update("rex", request(Some("rex"), Some("Max"), 8))
            .await
            .unwrap();
        assert_eq!(updated.name, "MAX");

        let found = service.find("rex").await.unwrap();
        assert_eq!(found.age, 8);
        assert_eq!(found.dog_age, Some(56));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found_before_validation() {
        let service = service();
        let result = service.update("ghost", request(None, None, -1)).await;
        assert!(matches!(result, Err(PetError::NotFound(id)) if id == "ghost"));
    }

    #[tokio::test]
    async fn test_update_rejects_mismatched_body_id() {
        let service = service();
        service.create(request(Some("rex"), Some("Rex"), 2)).await.unwrap();

        let result = service
            .update("rex", request(Some("max"), Some("Max"), 3))
            .await;
        assert!(matches!(result, Err(PetError::InvalidInput(_))));
        assert_eq!(service.find("rex").await.unwrap().name, "REX");
    }

    /// Reports the pet as present, then loses it before the write
    struct VanishingStore;

    #[async_trait]
    impl PetStore for VanishingStore {
        async fn put(&self, _pet: &Pet) -> crate::store::StoreResult<()> {
            Ok(())
        }

        async fn get(&self, id: &str) -> crate::store::StoreResult<Option<Pet>> {
            Ok(Some(Pet {
                id: id.to_string(),
                name: "GONE".to_string(),
                age: 1,
            }))
        }

        async fn scan(&self) -> crate::store::StoreResult<Vec<Pet>> {
            Ok(Vec::new())
        }

        async fn put_if_exists(&self, pet: &Pet) -> crate::store::StoreResult<()> {
            Err(StoreError::Missing(pet.id.clone()))
        }

        async fn delete(&self, _id: &str) -> crate::store::StoreResult<Option<Pet>> {
            Ok(None)
        }

        async fn health_check(&self) -> crate::store::StoreResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_update_race_with_delete_is_not_found() {
        let service = PetService::new(Arc::new(VanishingStore));
        let result = service
            .update("rex", request(None, Some("Rex"), 2))
            .await;
        assert!(matches!(result, Err(PetError::NotFound(id)) if id == "rex"));
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service();
        service.create(request(Some("rex"), Some("Rex"), 2)).await.unwrap();

        let deleted = service.delete("rex").await.unwrap();
        assert_eq!(deleted.name, "REX");
        assert!(matches!(service.delete("rex").await, Err(PetError::NotFound(_))));
        assert!(matches!(service.find("rex").await, Err(PetError::NotFound(_))));
    }
}
