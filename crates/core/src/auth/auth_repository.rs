use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use super::auth_model::LoginCredentials;
use super::auth_traits::{AuthRemoteTrait, AuthRepositoryTrait, TokenStore};
use crate::cache::Cleanable;
use crate::errors::{Result, ValidationError};
use crate::users::email_validator;
use crate::validation::{FieldValidator, RequiredValidator, ValidationResult};

pub struct AuthRepository {
    remote: Arc<dyn AuthRemoteTrait>,
    tokens: Arc<dyn TokenStore>,
}

impl AuthRepository {
    pub fn new(remote: Arc<dyn AuthRemoteTrait>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { remote, tokens }
    }
}

#[async_trait]
impl AuthRepositoryTrait for AuthRepository {
    async fn login(&self, email: &str, password: &str) -> Result<()> {
        let credentials = LoginCredentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        if let ValidationResult::Invalid(message) = email_validator().validate(&credentials.email) {
            return Err(ValidationError::field("email", message).into());
        }
        if let ValidationResult::Invalid(message) =
            RequiredValidator::new("Password is required").validate(&credentials.password)
        {
            return Err(ValidationError::field("password", message).into());
        }

        let tokens = self
            .remote
            .login(&credentials)
            .await
            .inspect_err(|e| warn!("Login failed for {}: {}", credentials.email, e))?;
        self.tokens.save_tokens(tokens)?;
        info!("Logged in as {}", credentials.email);
        Ok(())
    }

    fn logout(&self) -> Result<()> {
        self.tokens.clear_tokens()?;
        info!("Logged out");
        Ok(())
    }

    fn is_logged_in(&self) -> bool {
        self.tokens.is_logged_in()
    }
}

/// Signed-in session: the auth repository plus every cache that holds
/// per-account data.
pub struct Session {
    auth: Arc<dyn AuthRepositoryTrait>,
    caches: Vec<Arc<dyn Cleanable>>,
}

impl Session {
    pub fn new(auth: Arc<dyn AuthRepositoryTrait>) -> Self {
        Self {
            auth,
            caches: Vec::new(),
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn Cleanable>) -> Self {
        self.caches.push(cache);
        self
    }

    pub fn auth(&self) -> &Arc<dyn AuthRepositoryTrait> {
        &self.auth
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth.is_logged_in()
    }

    /// Clears tokens, then every registered cache. Caches are cleared even
    /// if the token store fails.
    pub fn logout(&self) -> Result<()> {
        let result = self.auth.logout();
        for cache in &self.caches {
            cache.clear();
        }
        result
    }
}
