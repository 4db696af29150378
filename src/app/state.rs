use crate::core::service::EligibilityService;
use std::sync::Arc;

pub struct AppState {
    pub service: EligibilityService,
}

impl AppState {
    pub fn new(service: EligibilityService) -> Arc<Self> {
        Arc::new(Self { service })
    }
}
