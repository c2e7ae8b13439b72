//! HTTP response building module
//!
//! Builders for every response the server emits. All of them carry the
//! configured `Server` header and, when enabled, the CORS allow-origin header.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};
use serde_json::Value;

use crate::config::HttpConfig;

const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

fn base_builder(status: StatusCode, http: &HttpConfig) -> Builder {
    let builder = Response::builder()
        .status(status)
        .header("Server", &http.server_name);

    if http.enable_cors {
        builder.header("Access-Control-Allow-Origin", "*")
    } else {
        builder
    }
}

/// Finish a response, dropping the body for HEAD requests but keeping its length
fn finish(
    builder: Builder,
    content_type: &str,
    body: Bytes,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = body.len();
    let body = if is_head { Bytes::new() } else { body };

    builder
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(&e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a JSON response
pub fn build_json_response(
    status: StatusCode,
    body: &Value,
    http: &HttpConfig,
    is_head: bool,
) -> Response<Full<Bytes>> {
    finish(
        base_builder(status, http),
        "application/json",
        Bytes::from(body.to_string()),
        is_head,
    )
}

/// Build `{"error": message}` with the given status
pub fn build_error_response(
    status: StatusCode,
    message: &str,
    http: &HttpConfig,
    is_head: bool,
) -> Response<Full<Bytes>> {
    build_json_response(status, &serde_json::json!({ "error": message }), http, is_head)
}

/// Build 404 Not Found response
pub fn build_404_response(http: &HttpConfig, is_head: bool) -> Response<Full<Bytes>> {
    build_error_response(StatusCode::NOT_FOUND, "Not Found", http, is_head)
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(http: &HttpConfig) -> Response<Full<Bytes>> {
    let builder = base_builder(StatusCode::METHOD_NOT_ALLOWED, http).header("Allow", ALLOWED_METHODS);
    finish(
        builder,
        "application/json",
        Bytes::from(r#"{"error":"Method Not Allowed"}"#),
        false,
    )
}

/// Build 413 Payload Too Large response
pub fn build_413_response(http: &HttpConfig) -> Response<Full<Bytes>> {
    build_error_response(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large", http, false)
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(http: &HttpConfig) -> Response<Full<Bytes>> {
    let mut builder = base_builder(StatusCode::NO_CONTENT, http).header("Allow", ALLOWED_METHODS);

    if http.enable_cors {
        builder = builder
            .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error(&e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build liveness response
pub fn build_health_response(http: &HttpConfig, is_head: bool) -> Response<Full<Bytes>> {
    finish(
        base_builder(StatusCode::OK, http),
        "text/plain; charset=utf-8",
        Bytes::from_static(b"OK"),
        is_head,
    )
}

/// Log response build error
fn log_build_error(error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn http_config(enable_cors: bool) -> HttpConfig {
        HttpConfig {
            server_name: "test/1.0".to_string(),
            enable_cors,
            max_body_size: 1024,
        }
    }

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_json_response_headers() {
        let resp = build_error_response(StatusCode::BAD_REQUEST, "nope", &http_config(false), false);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        assert_eq!(resp.headers()["Server"], "test/1.0");
        assert!(resp.headers().get("Access-Control-Allow-Origin").is_none());
        assert_eq!(body_string(resp).await, r#"{"error":"nope"}"#);
    }

    #[tokio::test]
    async fn test_head_keeps_length_drops_body() {
        let resp = build_health_response(&http_config(false), true);
        assert_eq!(resp.headers()["Content-Length"], "2");
        assert_eq!(body_string(resp).await, "");
    }

    #[test]
    fn test_cors_headers() {
        let resp = build_404_response(&http_config(true), false);
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");

        let resp = build_options_response(&http_config(true));
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(resp.headers()["Access-Control-Allow-Methods"], ALLOWED_METHODS);
    }

    #[test]
    fn test_options_without_cors() {
        let resp = build_options_response(&http_config(false));
        assert_eq!(resp.headers()["Allow"], ALLOWED_METHODS);
        assert!(resp.headers().get("Access-Control-Allow-Methods").is_none());
    }

    #[test]
    fn test_405_allow_header() {
        let resp = build_405_response(&http_config(false));
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["Allow"], ALLOWED_METHODS);
    }
}
