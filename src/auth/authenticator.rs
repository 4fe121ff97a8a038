use chrono::Utc;
use tracing::{debug, info, warn};

use crate::auth::token_state::TokenStore;
use crate::central::client::CentralClient;
use crate::config::central::Credentials;
use crate::observability::metrics::get_metrics;

static REFRESHED_MSG: &str = "refreshed";
static FAILED_MSG: &str = "failed";

/// Result of one `refresh_if_needed` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Enough lifetime left, no exchange issued.
    NotNeeded { remaining: i64 },
    /// Exchange succeeded and the token state was overwritten.
    Refreshed { expires_in: i64, refresh_token_rotated: bool },
    /// Exchange failed; the token state is unchanged.
    Failed,
}

/// Owns the token state and renews the access token before it expires.
#[derive(Debug, Clone)]
pub struct Authenticator {
    client: CentralClient,
    credentials: Credentials,
    store: TokenStore,
    safety_margin_seconds: i64,
}

impl Authenticator {
    pub fn new(client: CentralClient, credentials: Credentials, store: TokenStore, safety_margin_seconds: u64) -> Self {
        Self {
            client,
            credentials,
            store,
            safety_margin_seconds: i64::try_from(safety_margin_seconds).unwrap_or(i64::MAX),
        }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub async fn access_token(&self) -> String {
        self.store.access_token().await
    }

    pub async fn time_remaining(&self) -> i64 {
        self.store.time_remaining().await
    }

    /// Exchange the refresh token when fewer than `safety_margin_seconds`
    /// remain. At most one exchange is attempted; on failure the current
    /// tokens stay in place and the scrape goes on with them.
    pub async fn refresh_if_needed(&self) -> RefreshOutcome {
        let current = self.store.snapshot().await;
        if current.expires_in_seconds >= self.safety_margin_seconds {
            debug!("access token valid for {} more seconds", current.expires_in_seconds);
            return RefreshOutcome::NotNeeded { remaining: current.expires_in_seconds };
        }

        info!("access token expires in {} seconds, refreshing", current.expires_in_seconds);
        let metrics = get_metrics().await;

        match self
            .client
            .exchange_refresh_token(&self.credentials, &current.refresh_token, &current.access_token)
            .await
        {
            Ok(response) => {
                let expires_in = match response.expires_in {
                    Some(expires_in) => expires_in,
                    None => {
                        warn!("token exchange response has no expires_in, the next scrape refreshes again");
                        0
                    }
                };
                let refresh_token_rotated = self
                    .store
                    .replace(response.access_token, response.refresh_token, expires_in)
                    .await;
                if !refresh_token_rotated {
                    warn!("token exchange response has no refresh_token, keeping the previous one");
                }

                metrics.token_refreshes.with_label_values(&[REFRESHED_MSG]).inc();
                metrics.token_last_refresh.set(Utc::now().timestamp() as f64);
                info!("access token refreshed, expires in {} seconds", expires_in);
                RefreshOutcome::Refreshed { expires_in, refresh_token_rotated }
            }
            Err(err) => {
                metrics.token_refreshes.with_label_values(&[FAILED_MSG]).inc();
                warn!("token refresh failed, continuing with the current access token: {}", err);
                RefreshOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Authenticator, RefreshOutcome};
    use crate::auth::token_state::{TokenState, TokenStore};
    use crate::central::client::CentralClient;
    use crate::config::central::Credentials;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use reqwest::Client;
    use serde_json::json;

    fn authenticator(base_url: &str, expires_in: i64) -> Authenticator {
        let store = TokenStore::new(TokenState::new("access-0".into(), "refresh-0".into(), expires_in));
        let credentials = Credentials { client_id: "client-id".into(), client_secret: "client-secret".into() };
        Authenticator::new(CentralClient::new(Client::new(), base_url, false), credentials, store, 60)
    }

    #[tokio::test]
    async fn no_exchange_while_token_is_fresh() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(200).json_body(json!({"access_token": "x", "expires_in": 7200}));
            })
            .await;

        let auth = authenticator(&server.base_url(), 60);
        assert_eq!(auth.refresh_if_needed().await, RefreshOutcome::NotNeeded { remaining: 60 });
        assert_eq!(mock.calls_async().await, 0);
        assert_eq!(auth.access_token().await, "access-0");
    }

    #[tokio::test]
    async fn exchanges_below_threshold_and_resets_countdown() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/oauth2/token")
                    .query_param("client_id", "client-id")
                    .query_param("client_secret", "client-secret")
                    .query_param("grant_type", "refresh_token")
                    .query_param("refresh_token", "refresh-0");
                then.status(200).json_body(json!({
                    "access_token": "access-1",
                    "refresh_token": "refresh-1",
                    "token_type": "bearer",
                    "expires_in": 7200
                }));
            })
            .await;

        let auth = authenticator(&server.base_url(), 59);
        let outcome = auth.refresh_if_needed().await;

        assert_eq!(outcome, RefreshOutcome::Refreshed { expires_in: 7200, refresh_token_rotated: true });
        assert_eq!(mock.calls_async().await, 1);
        assert_eq!(auth.store().snapshot().await, TokenState::new("access-1".into(), "refresh-1".into(), 7200));
    }

    #[tokio::test]
    async fn overdue_negative_countdown_triggers_exchange() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(200).json_body(json!({"access_token": "access-1", "refresh_token": "refresh-1", "expires_in": 7200}));
            })
            .await;

        let auth = authenticator(&server.base_url(), -300);
        assert!(matches!(auth.refresh_if_needed().await, RefreshOutcome::Refreshed { .. }));
        assert_eq!(mock.calls_async().await, 1);
    }

    #[tokio::test]
    async fn keeps_refresh_token_when_response_omits_it() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(200).json_body(json!({"access_token": "access-1", "token_type": "bearer", "expires_in": 7200}));
            })
            .await;

        let auth = authenticator(&server.base_url(), 0);
        let outcome = auth.refresh_if_needed().await;

        assert_eq!(outcome, RefreshOutcome::Refreshed { expires_in: 7200, refresh_token_rotated: false });
        let state = auth.store().snapshot().await;
        assert_eq!(state.access_token, "access-1");
        assert_eq!(state.refresh_token, "refresh-0");
    }

    #[tokio::test]
    async fn missing_expires_in_leaves_countdown_at_zero() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(200).json_body(json!({"access_token": "access-1", "refresh_token": "refresh-1"}));
            })
            .await;

        let auth = authenticator(&server.base_url(), 10);
        let outcome = auth.refresh_if_needed().await;

        assert_eq!(outcome, RefreshOutcome::Refreshed { expires_in: 0, refresh_token_rotated: true });
        assert_eq!(auth.time_remaining().await, 0);

        // still below the margin, so the following call exchanges again
        assert!(matches!(auth.refresh_if_needed().await, RefreshOutcome::Refreshed { .. }));
        assert_eq!(mock.calls_async().await, 2);
    }

    #[tokio::test]
    async fn rejected_exchange_leaves_state_unchanged() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(400).json_body(json!({"error": "invalid_grant"}));
            })
            .await;

        let auth = authenticator(&server.base_url(), 10);
        assert_eq!(auth.refresh_if_needed().await, RefreshOutcome::Failed);
        assert_eq!(auth.store().snapshot().await, TokenState::new("access-0".into(), "refresh-0".into(), 10));
    }

    #[tokio::test]
    async fn response_without_access_token_is_a_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(200).json_body(json!({"refresh_token": "refresh-1", "expires_in": 7200}));
            })
            .await;

        let auth = authenticator(&server.base_url(), 10);
        assert_eq!(auth.refresh_if_needed().await, RefreshOutcome::Failed);
        assert_eq!(auth.store().snapshot().await.refresh_token, "refresh-0");
    }

    #[tokio::test]
    async fn unreachable_provider_leaves_state_unchanged() {
        // nothing listens on the discard port
        let auth = authenticator("http://127.0.0.1:9", 10);

        assert_eq!(auth.refresh_if_needed().await, RefreshOutcome::Failed);
        assert_eq!(auth.store().snapshot().await, TokenState::new("access-0".into(), "refresh-0".into(), 10));
    }
}
