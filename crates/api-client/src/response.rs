//! Response decoding shared by both clients.
//!
//! - 2xx with a body decodes into the expected type
//! - 2xx without a body is an error when a body was expected
//! - non-2xx must carry problem details, anything else is an invalid response

use log::{debug, error, warn};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{ApiClientError, Result};
use crate::types::ProblemDetails;

/// Parse a JSON response body.
pub(crate) async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    debug!("API response ({}): {}", status, body);
    decode(status, &body)
}

/// Same as [`parse_response`] without logging the body.
pub(crate) async fn parse_sensitive_response<T: DeserializeOwned>(
    response: Response,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    debug!("API response ({}): {} bytes", status, body.len());
    decode(status, &body)
}

/// Accept any 2xx and discard the body.
pub(crate) async fn expect_success(response: Response) -> Result<()> {
    let status = response.status();
    let body = response.text().await?;
    debug!("API response ({}): {}", status, body);
    if status.is_success() {
        Ok(())
    } else {
        Err(problem_error(status, &body))
    }
}

pub(crate) fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        return Err(problem_error(status, body));
    }
    if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
        return Err(ApiClientError::invalid_response("Response body is null"));
    }

    serde_json::from_str(body).map_err(|e| {
        error!("Failed to deserialize response. Body: {}, Error: {}", body, e);
        ApiClientError::Json(e)
    })
}

pub(crate) fn problem_error(status: StatusCode, body: &str) -> ApiClientError {
    match serde_json::from_str::<ProblemDetails>(body) {
        Ok(problem) => ApiClientError::api(status.as_u16(), problem),
        Err(e) => {
            warn!("Unparseable error body ({}): {}", status, e);
            ApiClientError::invalid_response(format!("Request failed ({}): {}", status, body))
        }
    }
}
