//! Client for the unauthenticated token endpoints.

use async_trait::async_trait;
use log::debug;
use skincare_core::auth::{AuthRemoteTrait, AuthTokens, LoginCredentials};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::response::parse_sensitive_response;
use crate::types::*;

/// Issues and refreshes token pairs. Requests carry no `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthApiClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl AuthApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: config.http_client()?,
            config,
        })
    }

    /// POST /auth/token (form-encoded)
    pub async fn token(&self, email: &str, password: &str) -> Result<AuthResponse> {
        debug!("Requesting token for {}", email);
        let response = self
            .client
            .post(self.config.url("auth/token"))
            .form(&TokenRequest {
                username: email,
                password,
            })
            .send()
            .await?;

        parse_sensitive_response(response).await
    }

    /// POST /auth/refresh
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<AuthResponse> {
        debug!("Refreshing access token");
        let response = self
            .client
            .post(self.config.url("auth/refresh"))
            .json(&RefreshTokenRequest { refresh_token })
            .send()
            .await?;

        parse_sensitive_response(response).await
    }
}

impl From<AuthResponse> for AuthTokens {
    fn from(response: AuthResponse) -> Self {
        AuthTokens::new(response.access_token, response.refresh_token)
    }
}

#[async_trait]
impl AuthRemoteTrait for AuthApiClient {
    async fn login(&self, credentials: &LoginCredentials) -> skincare_core::Result<AuthTokens> {
        Ok(self
            .token(&credentials.email, &credentials.password)
            .await?
            .into())
    }

    async fn refresh(&self, refresh_token: &str) -> skincare_core::Result<AuthTokens> {
        Ok(self.refresh_token(refresh_token).await?.into())
    }
}
