//! # HTTP Routes
//!
//! ```text
//! GET  /product/              product listing with itemLimit
//! POST /product/calculate     cart totals
//! POST /product/place-order   store a pending order
//! GET  /health                liveness + database probe
//! ```
//!
//! Paths match case-insensitively: the browser client calls `/Product/...`.
//! A request slower than the configured timeout gets `408 Request Timeout`.

use std::time::Duration;

use axum::extract::Request;
use axum::http::uri::PathAndQuery;
use axum::http::{StatusCode, Uri};
use axum::Router;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod health;
pub mod product;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(product::router())
        .merge(health::router())
}

/// Build a fully configured application with all middleware and state.
///
/// Used by both the server binary and the HTTP tests.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    let routes = build_router().with_state(state);

    // Paths are rewritten before the inner router matches them
    let app = Router::new().fallback_service(routes.map_request(lowercase_path));

    with_middleware(app, request_timeout)
}

/// CORS, per-request timeout and request tracing.
fn with_middleware<S>(router: Router<S>, request_timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        // Browser UI is served from another origin
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
}

/// Lowercases the request path, keeping the query string as sent.
fn lowercase_path(mut request: Request) -> Request {
    let path = request.uri().path();
    if !path.bytes().any(|b| b.is_ascii_uppercase()) {
        return request;
    }

    let mut rewritten = path.to_ascii_lowercase();
    if let Some(query) = request.uri().query() {
        rewritten.push('?');
        rewritten.push_str(query);
    }

    let mut parts = request.uri().clone().into_parts();
    let Ok(path_and_query) = rewritten.parse::<PathAndQuery>() else {
        return request;
    };
    parts.path_and_query = Some(path_and_query);

    if let Ok(uri) = Uri::from_parts(parts) {
        *request.uri_mut() = uri;
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http;
    use axum::routing::get;

    #[test]
    fn test_lowercase_path_keeps_query() {
        let request = http::Request::builder()
            .uri("/Product/Calculate?Member=M-1")
            .body(Body::empty())
            .unwrap();

        let request = lowercase_path(request);
        assert_eq!(request.uri().path(), "/product/calculate");
        assert_eq!(request.uri().query(), Some("Member=M-1"));
    }

    #[test]
    fn test_lowercase_path_leaves_canonical_paths_alone() {
        let request = http::Request::builder()
            .uri("/product/?page=2")
            .body(Body::empty())
            .unwrap();

        let request = lowercase_path(request);
        assert_eq!(request.uri(), "/product/?page=2");
    }

    #[tokio::test]
    async fn test_slow_request_times_out_with_408() {
        let slow = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "done"
            }),
        );
        let app = with_middleware(slow, Duration::from_millis(20));

        let response = app
            .oneshot(http::Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
