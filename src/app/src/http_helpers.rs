//! HTTP helper functions for Crux Core
//!
//! This module extracts common HTTP response handling logic from macros
//! into debuggable, testable functions. Everything ends up as the domain's
//! `Result<T, SubmitError>`.

use crux_http::{HttpError, Response};
use serde::{de::DeserializeOwned, Deserialize};

use crate::types::{ApiHost, SubmitError};

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Constructs the full address of `endpoint` below `api_host`.
///
/// # Example
/// ```
/// use authenticator_mobile_core::{http_helpers::build_url, types::ApiHost};
/// let host = ApiHost::parse("http://localhost:8000/").unwrap();
/// assert_eq!(build_url(&host, "/login"), "http://localhost:8000/login");
/// ```
pub fn build_url(api_host: &ApiHost, endpoint: &str) -> String {
    api_host.endpoint(endpoint)
}

/// Extracts the structured `detail` string from an error body.
///
/// Non-JSON bodies, missing or empty details and non-string details
/// (e.g. validation error lists) yield `None`.
pub fn extract_error_detail(body: &[u8]) -> Option<String> {
    let body: ErrorBody = serde_json::from_slice(body).ok()?;

    match body.detail? {
        serde_json::Value::String(detail) if !detail.is_empty() => Some(detail),
        _ => None,
    }
}

/// Check response status only (no body parsing).
pub fn check_response_status(response: &mut Response<Vec<u8>>) -> Result<(), SubmitError> {
    if response.status().is_success() {
        return Ok(());
    }

    let detail = response
        .take_body()
        .and_then(|body| extract_error_detail(&body));

    Err(SubmitError::Rejected {
        status: response.status().into(),
        detail,
    })
}

/// Parse JSON from a successful response body.
pub fn parse_json_response<T: DeserializeOwned>(
    response: &mut Response<Vec<u8>>,
) -> Result<T, SubmitError> {
    check_response_status(response)?;

    match response.take_body() {
        Some(body) => serde_json::from_slice(&body)
            .map_err(|e| SubmitError::Malformed(format!("JSON parse error: {e}"))),
        None => Err(SubmitError::Malformed("empty response body".to_string())),
    }
}

/// Map a failure to obtain a usable response
pub fn map_http_error(e: HttpError) -> SubmitError {
    match e {
        HttpError::Http { code, body, .. } => SubmitError::Rejected {
            status: code.into(),
            detail: body.as_deref().and_then(extract_error_detail),
        },
        HttpError::Json(msg) => SubmitError::Malformed(msg),
        e @ (HttpError::Url(_) | HttpError::Io(_) | HttpError::Timeout) => {
            SubmitError::Transport(e.to_string())
        }
    }
}

/// Process HTTP response result and check status only (no JSON parsing)
pub fn process_status_response(
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<(), SubmitError> {
    match result {
        Ok(mut response) => check_response_status(&mut response),
        Err(e) => Err(map_http_error(e)),
    }
}

/// Process HTTP response result and parse JSON
pub fn process_json_response<T: DeserializeOwned>(
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<T, SubmitError> {
    match result {
        Ok(mut response) => parse_json_response(&mut response),
        Err(e) => Err(map_http_error(e)),
    }
}
