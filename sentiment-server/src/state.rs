use std::sync::Arc;

use crate::db::repositories::StatusStore;
use crate::db::Dataset;

#[derive(Clone)]
pub struct AppState {
    pub dataset: Dataset,
    pub status_store: Arc<dyn StatusStore>,
}

impl AppState {
    pub fn new(dataset: Dataset, status_store: Arc<dyn StatusStore>) -> Self {
        Self {
            dataset,
            status_store,
        }
    }
}
