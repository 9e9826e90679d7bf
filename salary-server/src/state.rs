use std::sync::Arc;

use salary_core::{RateProvider, TaxConstants};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub constants: Arc<TaxConstants>,
    pub rates: Arc<dyn RateProvider>,
}

impl AppState {
    pub fn new(
        constants: TaxConstants,
        rates: Arc<dyn RateProvider>,
    ) -> Self {
        Self {
            constants: Arc::new(constants),
            rates,
        }
    }
}
