use std::sync::Arc;

use crate::bootstrap::RenderedMap;

// Application state shared with handlers; the map is rendered once and never changes
#[derive(Clone)]
pub struct AppState {
    pub rendered: Arc<RenderedMap>,
    pub page: Arc<String>,
}

impl AppState {
    pub fn new(rendered: RenderedMap, page: String) -> Self {
        Self {
            rendered: Arc::new(rendered),
            page: Arc::new(page),
        }
    }
}
