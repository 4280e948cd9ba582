//! JSON parsing for eConnect API replies

use crate::error::{LoginError, Result};
use crate::models::LoginResponse;

/// Parse the body of a /bulk/login reply
///
/// The body must be a JSON object; missing keys are fine, wrongly typed ones are not.
pub fn parse_login_response(body: &str) -> Result<LoginResponse> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| LoginError::MalformedResponse(format!("body is not JSON: {}", e)))?;

    if !value.is_object() {
        return Err(LoginError::MalformedResponse(format!(
            "expected a JSON object, got: {}",
            preview(body)
        )));
    }

    serde_json::from_value(value)
        .map_err(|e| LoginError::MalformedResponse(format!("unexpected field type: {}", e)))
}

fn preview(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(50)
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    &body[..end]
}
