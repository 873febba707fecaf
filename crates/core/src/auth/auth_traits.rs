//! Token persistence and authentication contracts.

use async_trait::async_trait;
use tokio::sync::watch;

use super::auth_model::{AuthTokens, LoginCredentials};
use crate::errors::Result;

/// Storage for the current token pair.
///
/// Reads are synchronous snapshots; `subscribe` lets callers observe
/// login/logout transitions.
pub trait TokenStore: Send + Sync {
    fn tokens(&self) -> Option<AuthTokens>;

    fn save_tokens(&self, tokens: AuthTokens) -> Result<()>;

    fn clear_tokens(&self) -> Result<()>;

    fn subscribe(&self) -> watch::Receiver<Option<AuthTokens>>;

    fn access_token(&self) -> Option<String> {
        self.tokens().map(|t| t.access_token)
    }

    fn refresh_token(&self) -> Option<String> {
        self.tokens().map(|t| t.refresh_token)
    }

    fn is_logged_in(&self) -> bool {
        self.access_token().is_some_and(|token| !token.trim().is_empty())
    }
}

/// Unauthenticated token endpoints.
#[async_trait]
pub trait AuthRemoteTrait: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthTokens>;

    async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens>;
}

#[async_trait]
pub trait AuthRepositoryTrait: Send + Sync {
    /// Exchanges credentials for tokens and stores them.
    async fn login(&self, email: &str, password: &str) -> Result<()>;

    fn logout(&self) -> Result<()>;

    fn is_logged_in(&self) -> bool;
}
