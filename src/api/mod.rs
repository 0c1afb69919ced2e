//! REST API for the clinic front end.
//!
//! Routes are nested under `/api/`, wrapped by CORS and the access log
//! middleware.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_server, ApiServer};
pub use types::ApiContext;
