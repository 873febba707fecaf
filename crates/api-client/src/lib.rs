//! Skincare API client - HTTP implementation of the remote traits in
//! `skincare-core`.
//!
//! [`AuthApiClient`] talks to the token endpoints; [`SkincareApiClient`]
//! covers everything else and renews the session on 401 through
//! [`TokenAuthenticator`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use skincare_api_client::{AuthApiClient, ClientConfig, SkincareApiClient};
//! use skincare_core::auth::MemoryTokenStore;
//!
//! let config = ClientConfig::new("http://localhost:8000/api/v1")
//!     .with_device_tz(chrono_tz::Europe::Warsaw);
//! let tokens = Arc::new(MemoryTokenStore::new());
//! let auth = Arc::new(AuthApiClient::new(config.clone())?);
//! let api = SkincareApiClient::new(config, tokens, auth)?;
//! let page = api.list_products(15, 0).await?;
//! ```

mod auth_client;
mod authenticator;
mod client;
mod config;
mod error;
mod mapping;
mod response;
mod types;

pub use auth_client::AuthApiClient;
pub use authenticator::TokenAuthenticator;
pub use client::SkincareApiClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use error::{ApiClientError, Result};
pub use mapping::{rule_create_request, rule_from_response, rule_update_request, ZoneContext};
pub use types::*;
