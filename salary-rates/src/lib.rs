//! Exchange-rate backends for the salary calculator.
//!
//! | backend       | type |
//! |---------------|------|
//! | `open-er-api` | [`OpenErApiProvider`], live rate with a one-slot cache |
//! | `fixed`       | [`FixedRateProvider`], always the configured fallback |
//!
//! Register the factories with a [`salary_core::RateProviderRegistry`]:
//!
//! ```rust
//! use salary_core::RateProviderRegistry;
//! use salary_rates::{FixedRateFactory, OpenErApiFactory};
//!
//! let mut registry = RateProviderRegistry::new();
//! registry.register(Box::new(OpenErApiFactory));
//! registry.register(Box::new(FixedRateFactory));
//!
//! assert_eq!(registry.available_backends(), vec!["fixed", "open-er-api"]);
//! ```

mod factory;
mod fixed;
mod open_er_api;

pub use factory::{FixedRateFactory, OpenErApiFactory};
pub use fixed::FixedRateProvider;
pub use open_er_api::OpenErApiProvider;
