use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failure conditions for a single outbound request and its downstream chain.
/// 404 is distinguished from other non-2xx statuses, though both are currently
/// handled the same way: logged, and the chain abandoned.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("resource not found (404)")]
    NotFound,
    #[error("request failed ({}): {message}", status_label(.status))]
    RequestFailed {
        status: Option<StatusCode>,
        message: String,
    },
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },
    #[error("reverse geocode returned no locations")]
    NoLocationMatch,
}

fn status_label(status: &Option<StatusCode>) -> String {
    match status {
        Some(s) => s.to_string(),
        None => "transport".to_string(),
    }
}

/// Turn a non-2xx status into its failure condition.
pub fn classify_failure(status: StatusCode, body: String) -> FetchError {
    if status == StatusCode::NOT_FOUND {
        FetchError::NotFound
    } else {
        FetchError::RequestFailed {
            status: Some(status),
            message: body,
        }
    }
}

/// Perform a GET, validate the status, and parse the body as JSON.
/// No retry, no timeout, no backoff: the first failure is returned as-is.
pub async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FetchError> {
    let resp = request.send().await.map_err(|e| FetchError::RequestFailed {
        status: None,
        message: e.to_string(),
    })?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(classify_failure(status, body));
    }

    resp.json::<T>()
        .await
        .map_err(|e| FetchError::MalformedResponse {
            message: e.to_string(),
        })
}
