use async_trait::async_trait;

use crate::models::Pet;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A conditional write found no existing row for the key
    #[error("pet {0} does not exist")]
    Missing(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-based access to the pets table
#[async_trait]
pub trait PetStore: Send + Sync {
    /// Insert or replace the pet keyed by `pet.id`
    async fn put(&self, pet: &Pet) -> StoreResult<()>;

    async fn get(&self, id: &str) -> StoreResult<Option<Pet>>;

    /// Read every pet, ordered by id
    async fn scan(&self) -> StoreResult<Vec<Pet>>;

    /// Replace the pet keyed by `pet.id`, failing with
    /// [`StoreError::Missing`] when no such row exists
    async fn put_if_exists(&self, pet: &Pet) -> StoreResult<()>;

    /// Remove the pet and return its prior value, or `None` if it was absent
    async fn delete(&self, id: &str) -> StoreResult<Option<Pet>>;

    async fn health_check(&self) -> StoreResult<()>;
}
