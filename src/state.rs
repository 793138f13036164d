use crate::service::PetService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pets: PetService,
}
