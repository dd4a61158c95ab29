//! Shared application state for all routes.

use crate::store::HeroStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HeroStore>,
}

impl AppState {
    pub fn new<S: HeroStore + 'static>(store: S) -> Self {
        AppState { store: Arc::new(store) }
    }
}
