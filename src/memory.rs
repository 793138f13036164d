use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::models::Pet;
use crate::store::{PetStore, StoreError, StoreResult};

/// In-process pet store, used for local runs and tests
#[derive(Default)]
pub struct InMemoryPetStore {
    pets: RwLock<BTreeMap<String, Pet>>,
}

impl InMemoryPetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PetStore for InMemoryPetStore {
    async fn put(&self, pet: &Pet) -> StoreResult<()> {
        self.pets.write().await.insert(pet.id.clone(), pet.clone());
        tracing::debug!("Stored pet with id: {}", pet.id);
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Pet>> {
        Ok(self.pets.read().await.get(id).cloned())
    }

    async fn scan(&self) -> StoreResult<Vec<Pet>> {
        Ok(self.pets.read().await.values().cloned().collect())
    }

    async fn put_if_exists(&self, pet: &Pet) -> StoreResult<()> {
        let mut pets = self.pets.write().await;
        match pets.get_mut(&pet.id) {
            Some(existing) => {
                *existing = pet.clone();
                tracing::debug!("Updated pet with id: {}", pet.id);
                Ok(())
            }
            None => Err(StoreError::Missing(pet.id.clone())),
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<Option<Pet>> {
        let removed = self.pets.write().await.remove(id);
        if removed.is_some() {
            tracing::debug!("Deleted pet with id: {}", id);
        }
        Ok(removed)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
