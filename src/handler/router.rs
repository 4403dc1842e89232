//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, path dispatch
//! and access logging.

use crate::config::AppState;
use crate::handler::endpoints;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Uri, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Paths served by the query endpoints
pub const ENDPOINTS: [&str; 5] = ["/", "/customers", "/products", "/dataframe", "/dataframe/html"];

/// Per-request values the endpoint handlers need
pub struct RequestContext<'a> {
    /// Raw query string (without leading ?)
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub pretty_json: bool,
    pub zero_is_unset: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let mut response = dispatch(req.method(), req.uri(), &state);
    http::apply_common_headers(&mut response, &state.config.http);

    if state.config.logging.access_log {
        log_access(&req, &response, peer_addr, started, &state);
    }

    Ok(response)
}

/// Route a request to its handler
pub fn dispatch(method: &Method, uri: &Uri, state: &AppState) -> Response<Full<Bytes>> {
    if let Some(resp) = check_http_method(method, state.config.http.enable_cors) {
        return resp;
    }

    let path = uri.path();
    let is_head = *method == Method::HEAD;

    let health = &state.config.health;
    if health.enabled && (path == health.liveness_path || path == health.readiness_path) {
        return http::build_health_response(is_head);
    }

    let ctx = RequestContext {
        query: uri.query(),
        is_head,
        pretty_json: state.config.http.pretty_json,
        zero_is_unset: state.config.query.zero_is_unset,
    };

    match path {
        "/" => endpoints::list_all(&ctx, state.catalog),
        "/customers" => endpoints::search_customers(&ctx, state.catalog),
        "/products" => endpoints::search_products(&ctx, state.catalog),
        "/dataframe" => endpoints::table_json(&ctx),
        "/dataframe/html" => endpoints::table_html(&ctx),
        _ => http::build_404_response(&ENDPOINTS, is_head),
    }
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn log_access(
    req: &Request<hyper::body::Incoming>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
    state: &AppState,
) {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    entry.user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    fn test_state() -> AppState {
        AppState::new(Config::load_from("no-such-config-file").unwrap())
    }

    fn get(state: &AppState, uri: &str) -> (StatusCode, Response<Full<Bytes>>) {
        let uri: Uri = uri.parse().unwrap();
        let resp = dispatch(&Method::GET, &uri, state);
        (resp.status(), resp)
    }

    async fn body_json(resp: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn get_json(state: &AppState, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, resp) = get(state, uri);
        (status, body_json(resp).await)
    }

    fn ids(value: &serde_json::Value) -> Vec<String> {
        value["results"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect()
    }

    #[tokio::test]
    async fn test_root_lists_everything() {
        let state = test_state();
        let (status, json) = get_json(&state, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_customers"], 5);
        assert_eq!(json["total_products"], 5);
        assert_eq!(json["customers"]["1"]["name"], "김철수");
        assert_eq!(json["products"]["3"]["category"], "의류");
    }

    #[tokio::test]
    async fn test_customers_by_encoded_name() {
        let state = test_state();
        let (status, json) =
            get_json(&state, "/customers?name=%EA%B9%80%EC%B2%A0%EC%88%98").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result_count"], 1);
        assert_eq!(json["results"]["1"]["phone"], "010-1234-5678");
    }

    #[tokio::test]
    async fn test_customers_age_range() {
        let state = test_state();
        let (_, json) = get_json(&state, "/customers?age_min=30&age_max=35").await;
        assert_eq!(ids(&json), vec!["1", "4"]);
        assert_eq!(json["result_count"], 2);
    }

    #[tokio::test]
    async fn test_products_by_category() {
        let state = test_state();
        // 전자제품
        let (_, json) = get_json(
            &state,
            "/products?category=%EC%A0%84%EC%9E%90%EC%A0%9C%ED%92%88",
        )
        .await;
        assert_eq!(ids(&json), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_products_price_min_zero() {
        let state = test_state();
        let (_, json) = get_json(&state, "/products?price_min=0").await;
        assert_eq!(json["result_count"], 5);
    }

    #[tokio::test]
    async fn test_zero_bound_enforced_when_configured() {
        let mut config = Config::load_from("no-such-config-file").unwrap();
        config.query.zero_is_unset = false;
        let state = AppState::new(config);
        let (_, json) = get_json(&state, "/products?price_max=0").await;
        assert_eq!(json["result_count"], 0);
    }

    #[tokio::test]
    async fn test_no_match_is_empty_not_error() {
        let state = test_state();
        let (status, json) = get_json(&state, "/customers?address=nowhere").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result_count"], 0);
        assert!(json["results"].as_object().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_integer_is_400() {
        let state = test_state();
        let (status, json) = get_json(&state, "/customers?age_min=old").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["param"], "age_min");
        assert_eq!(json["detail"], "age_min: expected an integer, got 'old'");
    }

    #[tokio::test]
    async fn test_huge_integer_is_a_bound_not_an_error() {
        let state = test_state();
        let (status, json) = get_json(&state, "/customers?age_min=99999999999999999999").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result_count"], 0);

        let (status, json) = get_json(&state, "/products?price_min=%20500000").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&json), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_unknown_params_ignored() {
        let state = test_state();
        let (status, json) = get_json(&state, "/products?color=red").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result_count"], 5);
    }

    #[tokio::test]
    async fn test_dataframe_json() {
        let state = test_state();
        let (status, json) = get_json(&state, "/dataframe").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({
                "dataframe": [{"a": 1, "b": 4}, {"a": 2, "b": 5}, {"a": 3, "b": 6}],
                "columns": ["a", "b"],
                "shape": [3, 2],
            })
        );
    }

    #[tokio::test]
    async fn test_dataframe_html_is_deterministic() {
        let state = test_state();
        let (status, first) = get(&state, "/dataframe/html");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first.headers()["Content-Type"], "text/html; charset=utf-8");
        let first = first.into_body().collect().await.unwrap().to_bytes();
        let (_, second) = get(&state, "/dataframe/html");
        let second = second.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(first, second);

        let html = String::from_utf8(first.to_vec()).unwrap();
        assert!(html.contains("id=\"dataframe\""));
        assert!(html.contains("class=\"dataframe table table-striped\""));
    }

    #[tokio::test]
    async fn test_health_and_not_found() {
        let state = test_state();
        let (status, json) = get_json(&state, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");

        let (status, json) = get_json(&state, "/orders").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["available_endpoints"].as_array().unwrap().len(), ENDPOINTS.len());
    }

    #[tokio::test]
    async fn test_head_has_empty_body() {
        let state = test_state();
        let uri: Uri = "/customers".parse().unwrap();
        let resp = dispatch(&Method::HEAD, &uri, &state);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_ne!(resp.headers()["Content-Length"], "0");
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_methods() {
        let state = test_state();
        let uri: Uri = "/customers".parse().unwrap();
        assert_eq!(
            dispatch(&Method::POST, &uri, &state).status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            dispatch(&Method::OPTIONS, &uri, &state).status(),
            StatusCode::NO_CONTENT
        );
    }
}
