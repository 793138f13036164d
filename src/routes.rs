// Route path constants - single source of truth for all API paths

pub const HEALTH: &str = "/health";
pub const PETS: &str = "/pets";
pub const PET_ITEM: &str = "/pets/{id}";
pub const PET_UPDATE: &str = "/pets/update/{id}";
pub const PET_DELETE: &str = "/pets/delete/{id}";

pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
