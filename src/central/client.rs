use http::HeaderMap;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::info;

use crate::central::error::{AuthError, FetchError};
use crate::config::central::Credentials;
use crate::utils::constants::{GRANT_TYPE_REFRESH_TOKEN, TOKEN_EXCHANGE_PATH};

/// Relative REST path plus the fixed query parameters of one upstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub query: &'static [(&'static str, &'static str)],
}

/// Body of a successful `oauth2/token` exchange.
#[derive(Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish()
    }
}

/// HTTP client for the Aruba Central API gateway.
#[derive(Debug, Clone)]
pub struct CentralClient {
    http: Client,
    base_url: String,
    verbose: bool,
}

impl CentralClient {
    pub fn new(http: Client, base_url: &str, verbose: bool) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            verbose,
        }
    }

    /// Join a relative API path onto the base url.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Authenticated GET of `endpoint`, decoded as `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &Endpoint, access_token: &str) -> Result<T, FetchError> {
        let response = self
            .http
            .get(self.url(endpoint.path))
            .query(endpoint.query)
            .bearer_auth(access_token)
            .header(http::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = self.read_body(endpoint.path, response).await?;
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Exchange `refresh_token` for a new token pair.
    pub async fn exchange_refresh_token(
        &self,
        credentials: &Credentials,
        refresh_token: &str,
        access_token: &str,
    ) -> Result<TokenResponse, AuthError> {
        let response = self
            .http
            .post(self.url(TOKEN_EXCHANGE_PATH))
            .query(&[
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("grant_type", GRANT_TYPE_REFRESH_TOKEN),
                ("refresh_token", refresh_token),
            ])
            .bearer_auth(access_token)
            .header(http::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = self.read_body(TOKEN_EXCHANGE_PATH, response).await?;
        if !status.is_success() {
            return Err(AuthError::Status(status));
        }

        let token_response: TokenResponse = serde_json::from_str(&body)?;
        if token_response.access_token.is_empty() {
            return Err(AuthError::MissingAccessToken);
        }
        Ok(token_response)
    }

    async fn read_body(&self, path: &str, response: Response) -> Result<String, reqwest::Error> {
        if self.verbose {
            log_response(path, response.status(), response.headers());
        }
        response.text().await
    }
}

fn log_response(path: &str, status: http::StatusCode, headers: &HeaderMap) {
    let headers: Vec<String> = headers
        .iter()
        .map(|(key, value)| format!("({}: {})", key, value.to_str().unwrap_or("<binary>")))
        .collect();
    info!("{} - HTTP Status Code: {}, headers: {}", path, status.as_u16(), headers.join(", "));
}
