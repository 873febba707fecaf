use tokio::sync::watch;

use super::auth_model::AuthTokens;
use super::auth_traits::TokenStore;
use crate::errors::Result;

/// Process-local token store. Also the in-memory half of persistent stores.
pub struct MemoryTokenStore {
    tokens: watch::Sender<Option<AuthTokens>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::with_tokens(None)
    }

    pub fn with_tokens(tokens: Option<AuthTokens>) -> Self {
        let (sender, _) = watch::channel(tokens);
        Self { tokens: sender }
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for MemoryTokenStore {
    fn tokens(&self) -> Option<AuthTokens> {
        self.tokens.borrow().clone()
    }

    fn save_tokens(&self, tokens: AuthTokens) -> Result<()> {
        self.tokens.send_replace(Some(tokens));
        Ok(())
    }

    fn clear_tokens(&self) -> Result<()> {
        self.tokens.send_replace(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthTokens>> {
        self.tokens.subscribe()
    }
}
