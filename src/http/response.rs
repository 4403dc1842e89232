//! HTTP response building module
//!
//! Builders for the status codes the query server emits, independent of any
//! particular endpoint.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, SERVER};
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::config::HttpConfig;

pub const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Build a response from a status, content type and body
///
/// For HEAD requests the body is dropped but `Content-Length` still reports
/// the size the GET response would have.
fn build(
    status: StatusCode,
    content_type: &str,
    body: Bytes,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = body.len();
    let body = if is_head { Bytes::new() } else { body };

    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build JSON response
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    pretty: bool,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let encoded = if pretty {
        serde_json::to_vec_pretty(body)
    } else {
        serde_json::to_vec(body)
    };
    match encoded {
        Ok(json) => build(status, "application/json", Bytes::from(json), is_head),
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            build(
                StatusCode::INTERNAL_SERVER_ERROR,
                "application/json",
                Bytes::from_static(br#"{"error":"Internal Server Error"}"#),
                is_head,
            )
        }
    }
}

/// Build HTML response
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    build(
        StatusCode::OK,
        "text/html; charset=utf-8",
        Bytes::from(content),
        is_head,
    )
}

/// Build 400 Bad Request response
pub fn build_400_response(
    message: &str,
    param: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Bad Request",
        "detail": message,
        "param": param,
    });
    build_json_response(StatusCode::BAD_REQUEST, &body, false, is_head)
}

/// Build 404 Not Found response listing the served endpoints
pub fn build_404_response(endpoints: &[&str], is_head: bool) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Not Found",
        "available_endpoints": endpoints,
    });
    build_json_response(StatusCode::NOT_FOUND, &body, false, is_head)
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    let mut resp = build(
        StatusCode::METHOD_NOT_ALLOWED,
        "text/plain",
        Bytes::from_static(b"405 Method Not Allowed"),
        false,
    );
    resp.headers_mut()
        .insert("Allow", HeaderValue::from_static(ALLOWED_METHODS));
    resp
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ALLOWED_METHODS);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error(StatusCode::NO_CONTENT, &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build health probe response
pub fn build_health_response(is_head: bool) -> Response<Full<Bytes>> {
    build(
        StatusCode::OK,
        "application/json",
        Bytes::from_static(br#"{"status":"ok"}"#),
        is_head,
    )
}

/// Add the headers every response carries
pub fn apply_common_headers(resp: &mut Response<Full<Bytes>>, http: &HttpConfig) {
    let headers = resp.headers_mut();
    match HeaderValue::from_str(&http.server_name) {
        Ok(value) => {
            headers.insert(SERVER, value);
        }
        Err(e) => log_build_error(StatusCode::OK, &e.into()),
    }
    if http.enable_cors {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
