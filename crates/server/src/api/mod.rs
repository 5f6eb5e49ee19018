pub mod discovery;
pub mod feed;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod ws;

pub use routes::create_router;

use serde::Serialize;

/// Body of every 4xx response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
