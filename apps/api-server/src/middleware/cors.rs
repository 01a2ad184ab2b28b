//! Cross-origin policy.

use actix_cors::Cors;

/// Any origin, any method, any header. Writes are protected by the API key alone.
pub fn permissive() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
}
