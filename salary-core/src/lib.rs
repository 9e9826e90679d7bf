pub mod calculations;
pub mod models;
pub mod rates;

pub use calculations::{CalculationError, SalaryCalculator};
pub use models::*;
pub use rates::{RateConfig, RateError, RateProvider, RateProviderFactory, RateProviderRegistry};
