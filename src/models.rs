//! Data models for the eConnect login exchange

use crate::error::{LoginError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credentials for a single PDU
#[derive(Clone)]
pub struct Credentials {
    pub ip: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(
        ip: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            ip: ip.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check every field before anything touches the network
    pub fn validate(&self) -> Result<()> {
        require("ip", &self.ip)?;
        require("username", &self.username)?;
        require("password", &self.password)?;

        // ip ends up as the authority of https://{ip}/bulk/login
        if self
            .ip
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '\\' | '?' | '#' | '@'))
        {
            return Err(LoginError::Validation {
                field: "ip",
                reason: "must be a bare host or host:port",
            });
        }
        let parsed = reqwest::Url::parse(&format!("https://{}/", self.ip));
        let bare_authority = matches!(parsed, Ok(ref url)
            if url.host_str().is_some()
                && url.path() == "/"
                && url.query().is_none()
                && url.fragment().is_none()
                && url.username().is_empty()
                && url.password().is_none());
        if !bare_authority {
            return Err(LoginError::Validation {
                field: "ip",
                reason: "is not a valid host",
            });
        }

        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LoginError::Validation {
            field,
            reason: "must not be empty",
        });
    }
    Ok(())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("ip", &self.ip)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Body of POST /bulk/login
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub user: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginRequest<'a> {
    fn from(creds: &'a Credentials) -> Self {
        Self {
            user: &creds.username,
            password: &creds.password,
        }
    }
}

/// Reply from POST /bulk/login
///
/// Every key is optional on the wire; absent and `null` both fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub sessionid: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default, rename = "resultCode")]
    pub result_code: Option<i64>,
}

/// Outcome of a login as handed back to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResult {
    #[serde(rename = "sessionid")]
    pub session_id: String,

    pub message: String,

    #[serde(rename = "resultCode")]
    pub result_code: i64,

    pub succeeded: bool,
}

impl From<LoginResponse> for LoginResult {
    fn from(resp: LoginResponse) -> Self {
        let result_code = resp.result_code.unwrap_or_default();
        Self {
            session_id: resp.sessionid.unwrap_or_default(),
            message: resp.message.unwrap_or_default(),
            result_code,
            succeeded: result_code == 0,
        }
    }
}

/// Document printed on stdout after a login attempt
#[derive(Debug, Serialize)]
pub struct LoginReport {
    /// A login never modifies the device
    pub changed: bool,

    pub failed: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,

    #[serde(rename = "sessionid")]
    pub session_id: String,

    pub message: String,

    #[serde(rename = "resultCode")]
    pub result_code: i64,

    pub succeeded: bool,
}

impl LoginReport {
    pub fn from_outcome(outcome: &Result<LoginResult>) -> Self {
        match outcome {
            Ok(result) => Self {
                changed: false,
                failed: false,
                msg: None,
                session_id: result.session_id.clone(),
                message: result.message.clone(),
                result_code: result.result_code,
                succeeded: result.succeeded,
            },
            Err(LoginError::Authentication {
                message,
                result_code,
                session_id,
            }) => Self {
                changed: false,
                failed: true,
                msg: Some("Chatsworth eConnect Power PDU returned a non-zero result code".to_string()),
                session_id: session_id.clone(),
                message: message.clone(),
                result_code: *result_code,
                succeeded: false,
            },
            Err(e) => Self {
                changed: false,
                failed: true,
                msg: Some(e.to_string()),
                session_id: String::new(),
                message: String::new(),
                result_code: 0,
                succeeded: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn creds(ip: &str, username: &str, password: &str) -> Credentials {
        Credentials::new(ip, username, password)
    }

    #[test]
    fn test_validate_accepts_addresses() {
        for ip in ["192.168.8.2", "pdu.lab.local", "10.0.0.5:8443", "[fe80::1]"] {
            assert!(creds(ip, "admin", "larry123").validate().is_ok(), "{ip}");
        }
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let cases = [
            (creds("", "admin", "larry123"), "ip"),
            (creds("192.168.8.2", "", "larry123"), "username"),
            (creds("192.168.8.2", "admin", ""), "password"),
            (creds("192.168.8.2", "   ", "larry123"), "username"),
        ];

        for (c, expected) in cases {
            match c.validate() {
                Err(LoginError::Validation { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected validation error for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_validate_rejects_urls_as_ip() {
        for ip in [
            "https://192.168.8.2",
            "192.168.8.2/bulk",
            "192.168.8.2\\bulk",
            "admin@pdu",
            "pdu host",
        ] {
            assert!(
                matches!(
                    creds(ip, "admin", "larry123").validate(),
                    Err(LoginError::Validation { field: "ip", .. })
                ),
                "{ip}"
            );
        }
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", creds("192.168.8.2", "admin", "larry123"));
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("larry123"));
    }

    #[test]
    fn test_request_wire_shape() {
        let c = creds("192.168.8.2", "admin", "larry123");
        let body = serde_json::to_value(LoginRequest::from(&c)).unwrap();
        assert_eq!(body, json!({"user": "admin", "password": "larry123"}));
    }

    #[test]
    fn test_result_defaults_and_success_flag() {
        let result = LoginResult::from(LoginResponse::default());
        assert_eq!(result.session_id, "");
        assert_eq!(result.message, "");
        assert_eq!(result.result_code, 0);
        assert!(result.succeeded);

        let failed = LoginResult::from(LoginResponse {
            result_code: Some(3),
            ..Default::default()
        });
        assert!(!failed.succeeded);
    }

    #[test]
    fn test_report_for_authentication_failure() {
        let outcome = Err(LoginError::Authentication {
            message: "Invalid user".to_string(),
            result_code: 1,
            session_id: String::new(),
        });
        let report = serde_json::to_value(LoginReport::from_outcome(&outcome)).unwrap();

        assert_eq!(report["changed"], json!(false));
        assert_eq!(report["failed"], json!(true));
        assert_eq!(report["message"], json!("Invalid user"));
        assert_eq!(report["resultCode"], json!(1));
        assert!(report["msg"].as_str().unwrap().contains("non-zero"));
    }

    #[test]
    fn test_report_for_success_omits_msg() {
        let outcome = Ok(LoginResult {
            session_id: "12ad3479876".to_string(),
            message: "OK".to_string(),
            result_code: 0,
            succeeded: true,
        });
        let report = serde_json::to_value(LoginReport::from_outcome(&outcome)).unwrap();

        assert_eq!(
            report,
            json!({
                "changed": false,
                "failed": false,
                "sessionid": "12ad3479876",
                "message": "OK",
                "resultCode": 0,
                "succeeded": true
            })
        );
    }
}
