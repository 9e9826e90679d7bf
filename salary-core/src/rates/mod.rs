//! USD to COP exchange-rate providers.
//!
//! The calculator never fetches rates itself. Backends live in their own
//! crates and are selected at startup through a [`RateProviderRegistry`].

pub mod factory;
pub mod provider;

pub use factory::{RateProviderFactory, RateProviderRegistry};
pub use provider::{RateConfig, RateError, RateProvider};
