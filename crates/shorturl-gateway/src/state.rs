use std::sync::Arc;

use shorturl_core::Registry;
use shorturl_validator::Validator;

#[derive(Clone)]
pub struct AppState {
    validator: Validator,
    registry: Arc<dyn Registry>,
}

impl AppState {
    pub fn new(validator: Validator, registry: Arc<dyn Registry>) -> Self {
        Self {
            validator,
            registry,
        }
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn registry(&self) -> &dyn Registry {
        self.registry.as_ref()
    }
}
