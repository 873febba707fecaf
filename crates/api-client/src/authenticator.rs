//! 401 recovery for authenticated requests.

use log::{debug, info, warn};
use skincare_core::auth::{AuthRemoteTrait, TokenStore};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Decides how to retry a request that came back 401.
///
/// Calls are serialized so that concurrent failures trigger at most one
/// refresh: the first caller refreshes, the rest see a token that differs
/// from the one they sent and retry with it.
pub struct TokenAuthenticator {
    tokens: Arc<dyn TokenStore>,
    auth: Arc<dyn AuthRemoteTrait>,
    lock: Mutex<()>,
}

impl TokenAuthenticator {
    pub fn new(tokens: Arc<dyn TokenStore>, auth: Arc<dyn AuthRemoteTrait>) -> Self {
        Self {
            tokens,
            auth,
            lock: Mutex::new(()),
        }
    }

    /// Returns the access token to retry with, or `None` when the session
    /// cannot be recovered and the 401 should surface.
    pub async fn authenticate(&self, failed_token: Option<&str>) -> Option<String> {
        let _guard = self.lock.lock().await;

        let current = self.tokens.tokens()?;
        if Some(current.access_token.as_str()) != failed_token {
            debug!("Retrying with token renewed by another request");
            return Some(current.access_token);
        }

        if current.refresh_token.trim().is_empty() {
            return None;
        }

        match self.auth.refresh(&current.refresh_token).await {
            Ok(fresh) => {
                let access_token = fresh.access_token.clone();
                if let Err(e) = self.tokens.save_tokens(fresh) {
                    warn!("Failed to persist refreshed tokens: {}", e);
                }
                info!("Access token refreshed");
                Some(access_token)
            }
            Err(e) => {
                warn!("Token refresh failed, signing out: {}", e);
                if let Err(e) = self.tokens.clear_tokens() {
                    warn!("Failed to clear tokens: {}", e);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use skincare_core::auth::{AuthTokens, LoginCredentials, MemoryTokenStore};
    use skincare_core::errors::{RemoteError, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct MockRefresher {
        refreshes: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl AuthRemoteTrait for MockRefresher {
        async fn login(&self, _credentials: &LoginCredentials) -> Result<AuthTokens> {
            unreachable!("login is not used by the authenticator")
        }

        async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens> {
            let n = self.refreshes.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.fail {
                return Err(RemoteError::network("offline").into());
            }
            Ok(AuthTokens::new(
                format!("access-{}", n + 1),
                format!("{}-rotated", refresh_token),
            ))
        }
    }

    fn setup(fail: bool) -> (Arc<MemoryTokenStore>, Arc<MockRefresher>, TokenAuthenticator) {
        let store = Arc::new(MemoryTokenStore::with_tokens(Some(AuthTokens::new(
            "access-1", "refresh-1",
        ))));
        let refresher = Arc::new(MockRefresher {
            fail,
            ..Default::default()
        });
        let authenticator = TokenAuthenticator::new(store.clone(), refresher.clone());
        (store, refresher, authenticator)
    }

    #[tokio::test]
    async fn test_refreshes_and_persists() {
        let (store, refresher, authenticator) = setup(false);

        let token = authenticator.authenticate(Some("access-1")).await;
        assert_eq!(token.as_deref(), Some("access-2"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1-rotated"));
        assert_eq!(refresher.refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_request_reuses_current_token() {
        let (_, refresher, authenticator) = setup(false);

        let token = authenticator.authenticate(Some("access-0")).await;
        assert_eq!(token.as_deref(), Some("access-1"));
        assert_eq!(refresher.refreshes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_concurrent_failures_refresh_once() {
        let (_, refresher, authenticator) = setup(false);

        let (a, b, c) = tokio::join!(
            authenticator.authenticate(Some("access-1")),
            authenticator.authenticate(Some("access-1")),
            authenticator.authenticate(Some("access-1")),
        );

        assert_eq!(refresher.refreshes.load(Ordering::SeqCst), 1);
        for token in [a, b, c] {
            assert_eq!(token.as_deref(), Some("access-2"));
        }
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_session() {
        let (store, _, authenticator) = setup(true);

        assert!(authenticator.authenticate(Some("access-1")).await.is_none());
        assert!(store.tokens().is_none());
    }

    #[tokio::test]
    async fn test_logged_out_gives_up() {
        let store = Arc::new(MemoryTokenStore::new());
        let refresher = Arc::new(MockRefresher::default());
        let authenticator = TokenAuthenticator::new(store, refresher.clone());

        assert!(authenticator.authenticate(None).await.is_none());
        assert_eq!(refresher.refreshes.load(Ordering::SeqCst), 0);
    }
}
