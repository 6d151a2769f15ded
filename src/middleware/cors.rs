use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Attach the permissive cross-origin headers to `headers`.
pub fn insert_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

/// Answers every `OPTIONS` request with an empty body and the CORS headers,
/// and stamps the same headers on every response under `/api`.
/// Static asset responses are passed through untouched.
pub async fn cors(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut resp = Body::empty().into_response();
        insert_cors_headers(resp.headers_mut());
        return resp;
    }

    let is_api = crate::router::is_api_path(req.uri().path());
    let mut resp = next.run(req).await;
    if is_api {
        insert_cors_headers(resp.headers_mut());
    }
    resp
}
