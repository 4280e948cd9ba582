//! eConnect PDU login
//!
//! One POST to `/bulk/login` trades a username and password for a session token
//! that the PDU's other bulk endpoints accept.

use crate::config::{HttpConfig, Scheme};
use crate::error::{LoginError, Result};
use crate::http::HttpClient;
use crate::models::{Credentials, LoginRequest, LoginResult};
use crate::parser;

const LOGIN_PATH: &str = "/bulk/login";

pub struct LoginClient {
    client: HttpClient,
    scheme: Scheme,
}

impl LoginClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(config)?,
            scheme: config.scheme,
        })
    }

    pub fn login_url(&self, ip: &str) -> String {
        format!("{}://{}{}", self.scheme, ip, LOGIN_PATH)
    }

    /// Log into the PDU and return its session token
    ///
    /// A reply with a non-zero `resultCode` is an error, not a failed result.
    pub async fn login(&self, creds: &Credentials) -> Result<LoginResult> {
        creds.validate()?;

        let url = self.login_url(&creds.ip);
        tracing::info!("Logging into PDU at {}...", creds.ip);
        tracing::debug!("   -> As user: {}", creds.username);

        let resp = self
            .client
            .post_json(&url, &LoginRequest::from(creds))
            .await?;
        let body = resp.text().await?;

        let result = LoginResult::from(parser::parse_login_response(&body)?);
        if !result.succeeded {
            tracing::warn!(
                "PDU at {} rejected login: resultCode={} message='{}'",
                creds.ip,
                result.result_code,
                result.message
            );
            return Err(LoginError::Authentication {
                message: result.message,
                result_code: result.result_code,
                session_id: result.session_id,
            });
        }

        tracing::info!("Logged into PDU at {}: {}", creds.ip, result.message);
        Ok(result)
    }
}
