use std::sync::Arc;

use crate::pipeline::EmissionService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EmissionService>,
}

impl AppState {
    pub fn new(service: EmissionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
