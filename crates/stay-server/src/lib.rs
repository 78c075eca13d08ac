//! HTTP server for the Stay catalog.
//!
//! Maps REST verbs onto the store's operations, one resource per entity
//! type, with request validation at this boundary and none inside the
//! store. Store outcomes become status codes: absent record → 404, bad
//! body → 400, creation → 201, everything else → 200.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use router::build_router;
pub use server::ApiServer;
pub use state::AppState;
