use axum::{extract::DefaultBodyLimit, Router};
use tower_http::limit::RequestBodyLimitLayer;

/// Cap request bodies at `max_bytes`.
///
/// Bodies announced larger by `content-length` are refused with 413 before a
/// handler runs; streamed bodies fail while buffering and the extractor
/// rejection is reported as 413 too. axum's own extractor limit is raised to
/// the same value so it does not cut in first.
pub fn limit_body(router: Router, max_bytes: usize) -> Router {
    router
        .layer(DefaultBodyLimit::max(max_bytes))
        .layer(RequestBodyLimitLayer::new(max_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        routing::post,
    };
    use tower::ServiceExt;

    fn echo(max_bytes: usize) -> Router {
        let router = Router::new().route(
            "/api/artworks",
            post(|body: String| async move { body.len().to_string() }),
        );
        limit_body(router, max_bytes)
    }

    #[tokio::test]
    async fn announced_oversized_bodies_are_rejected() {
        let req = Request::post("/api/artworks")
            .header(header::CONTENT_LENGTH, "64")
            .body(Body::from("x".repeat(64)))
            .unwrap();
        let resp = echo(8).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn limit_above_axum_default_is_honored() {
        let size = 3 * 1024 * 1024;
        let req = Request::post("/api/artworks")
            .body(Body::from("x".repeat(size)))
            .unwrap();
        let resp = echo(4 * 1024 * 1024).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
