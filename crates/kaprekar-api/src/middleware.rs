//! Middleware layers for the API.
use tower_http::cors::CorsLayer;

/// Permissive CORS for browser clients.
pub fn cors() -> CorsLayer {
    CorsLayer::permissive()
}
