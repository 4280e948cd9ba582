//! HTTP client with timeouts, cookie support and configurable TLS verification

use crate::config::HttpConfig;
use crate::error::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response};
use std::time::Duration;

pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("econnect-login/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled for PDU requests");
        }

        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(headers)
            .build()?;

        Ok(Self { inner: client })
    }

    /// POST a JSON body once
    ///
    /// Non-2xx statuses are returned as-is; the PDU reports failures in the body.
    pub async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<Response> {
        let resp = self.inner.post(url).json(body).send().await?;
        tracing::debug!("POST {} -> {}", url, resp.status());
        Ok(resp)
    }
}
