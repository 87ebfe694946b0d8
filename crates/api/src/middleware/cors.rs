use tower_http::cors::{Any, CorsLayer};

/// Cross-origin requests are accepted from any origin, with any method and header.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
