use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::central::InitialTokens;

/// Current OAuth2 token pair and the countdown to access-token expiry.
///
/// `expires_in_seconds` is allowed to go negative: that means a refresh is
/// overdue, not that the state is invalid.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenState {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in_seconds: i64,
}

impl TokenState {
    pub fn new(access_token: String, refresh_token: String, expires_in_seconds: i64) -> Self {
        Self { access_token, refresh_token, expires_in_seconds }
    }
}

impl From<&InitialTokens> for TokenState {
    fn from(tokens: &InitialTokens) -> Self {
        Self::new(tokens.access_token.to_owned(), tokens.refresh_token.to_owned(), tokens.expires_in)
    }
}

impl std::fmt::Debug for TokenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenState")
            .field("access_token", &"***")
            .field("refresh_token", &"***")
            .field("expires_in_seconds", &self.expires_in_seconds)
            .finish()
    }
}

/// Shared handle to the process-wide [`TokenState`].
#[derive(Debug, Clone)]
pub struct TokenStore {
    inner: Arc<RwLock<TokenState>>,
}

impl TokenStore {
    pub fn new(state: TokenState) -> Self {
        Self { inner: Arc::new(RwLock::new(state)) }
    }

    pub async fn snapshot(&self) -> TokenState {
        self.inner.read().await.clone()
    }

    pub async fn access_token(&self) -> String {
        self.inner.read().await.access_token.to_owned()
    }

    /// Seconds until the access token expires, negative when overdue.
    pub async fn time_remaining(&self) -> i64 {
        self.inner.read().await.expires_in_seconds
    }

    /// Decrement the countdown by one second and return the new value.
    pub async fn tick(&self) -> i64 {
        let mut state = self.inner.write().await;
        state.expires_in_seconds -= 1;
        state.expires_in_seconds
    }

    /// Overwrite the pair and reset the countdown in one critical section.
    ///
    /// Keeps the current refresh token when `refresh_token` is `None` or empty
    /// and returns whether the refresh token was rotated.
    pub async fn replace(&self, access_token: String, refresh_token: Option<String>, expires_in_seconds: i64) -> bool {
        let mut state = self.inner.write().await;
        state.access_token = access_token;
        state.expires_in_seconds = expires_in_seconds;
        match refresh_token.filter(|token| !token.is_empty()) {
            Some(token) => {
                state.refresh_token = token;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TokenState, TokenStore};

    fn store(expires_in: i64) -> TokenStore {
        TokenStore::new(TokenState::new("access-0".into(), "refresh-0".into(), expires_in))
    }

    #[tokio::test]
    async fn tick_runs_below_zero() {
        let store = store(1);
        assert_eq!(store.tick().await, 0);
        assert_eq!(store.tick().await, -1);
        assert_eq!(store.time_remaining().await, -1);
    }

    #[tokio::test]
    async fn replace_rotates_both_tokens() {
        let store = store(5);
        let rotated = store.replace("access-1".into(), Some("refresh-1".into()), 3600).await;

        assert!(rotated);
        assert_eq!(store.snapshot().await, TokenState::new("access-1".into(), "refresh-1".into(), 3600));
    }

    #[tokio::test]
    async fn replace_keeps_refresh_token_when_omitted() {
        let store = store(5);
        assert!(!store.replace("access-1".into(), None, 3600).await);
        assert!(!store.replace("access-2".into(), Some(String::new()), 1800).await);

        let state = store.snapshot().await;
        assert_eq!(state.access_token, "access-2");
        assert_eq!(state.refresh_token, "refresh-0");
        assert_eq!(state.expires_in_seconds, 1800);
    }

    #[test]
    fn debug_output_hides_tokens() {
        let state = TokenState::new("secret-access".into(), "secret-refresh".into(), 10);
        let printed = format!("{:?}", state);
        assert!(!printed.contains("secret"));
        assert!(printed.contains("expires_in_seconds: 10"));
    }
}
