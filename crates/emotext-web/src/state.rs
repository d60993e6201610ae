//! Application state.

use std::sync::Arc;

use emotext_core::{EmotionApi, EmotionService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: EmotionService,
}

impl AppState {
    pub fn new(api: Arc<dyn EmotionApi>) -> Self {
        Self {
            service: EmotionService::new(api),
        }
    }
}
