// Application state module
// Bundles everything request handling needs behind a single Arc

use super::types::Config;
use crate::routing::TemplateRouter;
use crate::template::TemplateStore;

/// Shared application state
///
/// Read-only after startup: the route table and template store are built
/// once in `main`, so request handlers can share this without locking.
pub struct AppState {
    pub config: Config,
    pub router: TemplateRouter,
    pub templates: TemplateStore,
}

impl AppState {
    pub const fn new(config: Config, router: TemplateRouter, templates: TemplateStore) -> Self {
        Self {
            config,
            router,
            templates,
        }
    }
}
