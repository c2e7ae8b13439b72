//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, body size
//! check, health probe, route matching, then validation and dispatch.

use std::net::SocketAddr;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{HeaderMap, Method, Request, Response, Uri};

use super::{dispatch, validate};
use crate::config::{AppState, HttpConfig};
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
pub fn handle_request<B>(
    req: &Request<B>,
    peer_addr: SocketAddr,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let started = Instant::now();
    let method = req.method();
    let http_config = &state.config.http;

    let response = if let Some(resp) = check_http_method(method, http_config) {
        resp
    } else if let Some(resp) = check_body_size(req.headers(), http_config) {
        resp
    } else {
        route_request(req.uri(), *method == Method::HEAD, state)
    };

    if state.config.logging.access_log {
        log_access(req, peer_addr, &response, started, &state.config.logging.access_log_format);
    }

    response
}

/// Check HTTP method and return a response for anything but GET/HEAD
fn check_http_method(method: &Method, http_config: &HttpConfig) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(http_config)),
        _ => {
            logger::log_debug(&format!("Method not allowed: {method}"));
            Some(http::build_405_response(http_config))
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(headers: &HeaderMap, http_config: &HttpConfig) -> Option<Response<Full<Bytes>>> {
    let content_length = headers.get("content-length")?;
    let max_body_size = http_config.max_body_size;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response(http_config))
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Route request based on path
fn route_request(uri: &Uri, is_head: bool, state: &AppState) -> Response<Full<Bytes>> {
    let path = uri.path();
    let http_config = &state.config.http;
    let health = &state.config.routes.health;

    // Health check endpoint (highest priority)
    if health.enabled && path == health.path {
        return http::build_health_response(http_config, is_head);
    }

    let Some(route) = state.routes.match_route(path) else {
        return http::build_404_response(http_config, is_head);
    };

    let operation = route.operation;
    let outcome = validate::validate(uri.query(), operation.requires_b())
        .and_then(|operands| dispatch::dispatch(operation, operands));

    if let Err(e) = &outcome {
        logger::log_debug(&format!("{path} rejected: {e}"));
    }

    dispatch::respond(outcome, http_config, is_head)
}

fn log_access<B>(
    req: &Request<B>,
    peer_addr: SocketAddr,
    response: &Response<Full<Bytes>>,
    started: Instant,
    format: &str,
) {
    let entry = access_entry(req, peer_addr, response, started);
    logger::log_access(&entry, format);
}

fn access_entry<B>(
    req: &Request<B>,
    peer_addr: SocketAddr,
    response: &Response<Full<Bytes>>,
    started: Instant,
) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = format!("{:?}", req.version())
        .trim_start_matches("HTTP/")
        .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .map_or(0, |n| usize::try_from(n).unwrap_or(usize::MAX));
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}
