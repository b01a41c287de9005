//! Middleware for the mock API.
//!
//! The front-end dev server and this mock backend run on different
//! ports, so CORS must be open for local development.

use actix_cors::Cors;
use actix_web::middleware::Logger;

/// Standard request logging.
pub fn standard_middleware() -> Logger {
    Logger::default()
}

/// Permissive CORS, adequate for a development-only mock.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST"])
        .max_age(3600)
}
