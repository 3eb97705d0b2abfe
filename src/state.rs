use crate::storage::DrillStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DrillStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DrillStore>) -> Self {
        Self { store }
    }
}
