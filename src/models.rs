use serde::{Deserialize, Serialize};

/// A pet as persisted in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub age: i32,
}

/// Request body for create and update
#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PetRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: i32,
}

/// A pet as returned by the API
///
/// `dogAge` is only present on read paths; it is computed from `age` and
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    pub id: String,
    pub name: String,
    pub age: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dog_age: Option<i64>,
}

impl From<Pet> for PetResponse {
    fn from(pet: Pet) -> Self {
        PetResponse {
            id: pet.id,
            name: pet.name,
            age: pet.age,
            dog_age: None,
        }
    }
}
