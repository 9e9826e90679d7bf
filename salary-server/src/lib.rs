pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig, TaxConfig};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
