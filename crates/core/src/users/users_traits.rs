use async_trait::async_trait;
use tokio::sync::watch;

use super::users_model::{User, UserRegistration, UserUpdate};
use crate::cache::Cleanable;
use crate::errors::Result;

/// Contract for the remote account endpoints.
#[async_trait]
pub trait UserRemoteTrait: Send + Sync {
    /// Creates an account. Does not authenticate.
    async fn register(&self, registration: &UserRegistration) -> Result<User>;
    async fn me(&self) -> Result<User>;
    async fn update_me(&self, update: &UserUpdate) -> Result<User>;
}

#[async_trait]
pub trait UserRepositoryTrait: Cleanable {
    /// Last fetched profile of the signed-in user.
    fn user(&self) -> Option<User>;

    fn subscribe(&self) -> watch::Receiver<Option<User>>;

    async fn register(&self, registration: UserRegistration) -> Result<User>;

    async fn profile(&self) -> Result<User>;

    async fn update(&self, update: UserUpdate) -> Result<User>;
}
