use std::sync::Arc;

use agenda_core::{EventService, MongoStore};

/// Shared application state: the event service over its injected store handle.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EventService<MongoStore>>,
}

impl AppState {
    pub fn new(service: EventService<MongoStore>) -> Self {
        AppState {
            service: Arc::new(service),
        }
    }
}
