//! HTTP response handling shared by the request macros
//!
//! `crux_http` hands every response closure a raw
//! `crux_http::Result<Response<Vec<u8>>>`; these helpers turn it into a typed
//! result so handlers only ever see domain values or an [`HttpError`].

use crux_core::Command;
use crux_http::Response;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::events::Event;
use crate::model::Model;
use crate::Effect;

/// Prefix for device-service endpoints.
///
/// `crux_http` rejects relative URLs, so the shell strips this prefix before
/// issuing the request and calls stay relative to the page origin. Requests
/// against another address (the new IP) use absolute URLs instead.
pub const BASE_URL: &str = "https://relative";

pub fn build_url(endpoint: &str) -> String {
    format!("{BASE_URL}{endpoint}")
}

/// Failure of a request as seen by the handlers
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpError {
    #[error("{action} failed: {message}")]
    Transport { action: String, message: String },
    #[error("{action} failed: not authorized")]
    Unauthorized { action: String },
    #[error("{action} failed: HTTP {status}: {message}")]
    Status {
        action: String,
        status: u16,
        message: String,
    },
    #[error("{action}: {message}")]
    Parse { action: String, message: String },
}

impl HttpError {
    /// Device did not answer at all; during polling this means "still down"
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// The request never produced a response (unreachable, aborted, TLS failure)
pub fn map_http_error(action: &str, error: crux_http::HttpError) -> HttpError {
    HttpError::Transport {
        action: action.to_string(),
        message: error.to_string(),
    }
}

pub fn is_response_success(response: &Response<Vec<u8>>) -> bool {
    response.status().is_success()
}

/// Map a non-2xx response to an error, keeping a readable body as message
pub fn extract_error_message(action: &str, response: &mut Response<Vec<u8>>) -> HttpError {
    let status = u16::from(response.status());
    if status == 401 {
        return HttpError::Unauthorized {
            action: action.to_string(),
        };
    }

    let body = response.take_body().unwrap_or_default();
    let message = match String::from_utf8(body) {
        Ok(text) if text.trim().is_empty() => "(Empty body)".to_string(),
        Ok(text) => text,
        Err(e) => format!("(Invalid UTF-8: {e})"),
    };

    HttpError::Status {
        action: action.to_string(),
        status,
        message,
    }
}

pub fn check_response_status(
    action: &str,
    response: &mut Response<Vec<u8>>,
) -> Result<(), HttpError> {
    if is_response_success(response) {
        Ok(())
    } else {
        Err(extract_error_message(action, response))
    }
}

pub fn parse_json_response<T: DeserializeOwned>(
    action: &str,
    response: &mut Response<Vec<u8>>,
) -> Result<T, HttpError> {
    check_response_status(action, response)?;

    match response.take_body() {
        Some(body) if !body.is_empty() => {
            serde_json::from_slice(&body).map_err(|e| HttpError::Parse {
                action: action.to_string(),
                message: format!("JSON parse error: {e}"),
            })
        }
        _ => Err(HttpError::Parse {
            action: action.to_string(),
            message: "Empty response body".to_string(),
        }),
    }
}

/// Plain text body, e.g. session tokens
pub fn extract_string_response(
    action: &str,
    response: &mut Response<Vec<u8>>,
) -> Result<String, HttpError> {
    check_response_status(action, response)?;

    match response.take_body() {
        Some(body) if !body.is_empty() => String::from_utf8(body).map_err(|_| HttpError::Parse {
            action: action.to_string(),
            message: "Invalid UTF-8 in response".to_string(),
        }),
        _ => Err(HttpError::Parse {
            action: action.to_string(),
            message: "Empty response body".to_string(),
        }),
    }
}

pub fn process_status_response(
    action: &str,
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<(), HttpError> {
    match result {
        Ok(mut response) => check_response_status(action, &mut response),
        Err(e) => Err(map_http_error(action, e)),
    }
}

pub fn process_json_response<T: DeserializeOwned>(
    action: &str,
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<T, HttpError> {
    match result {
        Ok(mut response) => parse_json_response(action, &mut response),
        Err(e) => Err(map_http_error(action, e)),
    }
}

pub fn process_string_response(
    action: &str,
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<String, HttpError> {
    match result {
        Ok(mut response) => extract_string_response(action, &mut response),
        Err(e) => Err(map_http_error(action, e)),
    }
}

/// Authenticated request without a session: report and issue nothing
pub fn handle_auth_error(model: &mut Model, action: &str) -> Command<Effect, Event> {
    log::warn!("{action} requested without a session");
    model.set_error(format!("{action} failed: Not authenticated"));
    crux_core::render::render()
}

/// Request could not be built; report and issue nothing
pub fn handle_request_error(
    model: &mut Model,
    action: &str,
    error: impl std::fmt::Display,
) -> Command<Effect, Event> {
    model.set_error(format!("Failed to create {action} request: {error}"));
    crux_core::render::render()
}
