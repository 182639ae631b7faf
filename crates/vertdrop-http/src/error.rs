//! Mapping of transport failures and error responses onto `AppError`.

use serde::Deserialize;

use vertdrop_core::{AppError, ErrorKind};

/// Error body shapes the backend is known to send.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Build the error for a non-success `status`, preferring the message
/// carried in the response body.
pub fn from_response(status: u16, body: &str, path: &str) -> AppError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {status} from {path}"));

    AppError::from_status(status, detail.clone())
        .unwrap_or_else(|| AppError::internal(format!("Unexpected HTTP {status}: {detail}")))
}

/// Map a request that produced no usable response.
pub fn from_transport(err: reqwest::Error, path: &str) -> AppError {
    let message = if err.is_timeout() {
        format!("Request to {path} timed out")
    } else if err.is_connect() {
        format!("Backend unreachable for {path}")
    } else {
        format!("Request to {path} failed")
    };
    AppError::with_source(ErrorKind::Network, message, err)
}
