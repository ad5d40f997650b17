//! power-routine/crates/pr-api/src/middleware.rs Middleware
//!
//! Access logging, CORS and security headers.

use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};

// Returns the access logger used by the binary.
pub fn standard_middleware() -> Logger {
    // remote-ip "request-line" status-code response-size "referrer" "user-agent"
    Logger::default()
}

// The JSON routes are public and read-only apart from likes and posts.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST"])
        .allow_any_header()
        .max_age(3600)
}

pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("Referrer-Policy", "strict-origin-when-cross-origin"))
}
