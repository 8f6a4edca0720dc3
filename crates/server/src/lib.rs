//! HTTP browse service over the current Gatelogue snapshot.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::Args;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
