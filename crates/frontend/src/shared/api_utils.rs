//! Helpers shared by every HTTP client in the app.

use contracts::shared::api_error::ApiError;
use gloo_net::http::Response;

/// Backend base URL: same host as the page, port 3000.
///
/// Returns an empty string when there is no window (tests, workers).
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Full URL for an `/api/...` path
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Error for a request that never produced a response
pub fn transport(err: gloo_net::Error) -> ApiError {
    log::warn!("request failed: {}", err);
    ApiError::transport(err.to_string())
}

/// Turn a non-2xx response into an [`ApiError`], keeping field errors.
pub async fn read_failure(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log::warn!("HTTP {} from {}", status, response.url());
    ApiError::from_response(status, &body)
}

/// Pass 2xx responses through, decode anything else
pub async fn expect_ok(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        Ok(response)
    } else {
        Err(read_failure(response).await)
    }
}
