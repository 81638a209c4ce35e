use axum::{
    body::Body,
    http::{HeaderValue, Request, Response, header},
    middleware::Next,
};

/// Middleware to set cache control headers
/// - API responses: never cached, they carry per-visitor outcomes
/// - Everything else: revalidated on every request
pub async fn cache_control_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let is_api = req.uri().path().starts_with("/api/");
    let mut response = next.run(req).await;

    let headers = response.headers_mut();

    if is_api {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate, proxy-revalidate"),
        );
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    } else {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    }

    response
}
