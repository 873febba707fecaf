use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::watch;

use super::users_model::{User, UserRegistration, UserUpdate};
use super::users_traits::{UserRemoteTrait, UserRepositoryTrait};
use crate::cache::Cleanable;
use crate::errors::Result;

/// Keeps the signed-in user's profile. Registration does not touch it.
pub struct UserRepository {
    remote: Arc<dyn UserRemoteTrait>,
    current: watch::Sender<Option<User>>,
}

impl UserRepository {
    pub fn new(remote: Arc<dyn UserRemoteTrait>) -> Self {
        let (current, _) = watch::channel(None);
        Self { remote, current }
    }
}

impl Cleanable for UserRepository {
    fn clear(&self) {
        self.current.send_replace(None);
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn user(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current.subscribe()
    }

    async fn register(&self, registration: UserRegistration) -> Result<User> {
        registration.validate()?;
        let user = self
            .remote
            .register(&registration)
            .await
            .inspect_err(|e| warn!("Registration of {} failed: {}", registration.username, e))?;
        info!("Registered user {}", user.username);
        Ok(user)
    }

    async fn profile(&self) -> Result<User> {
        let user = self.remote.me().await?;
        debug!("Loaded profile of {}", user.username);
        self.current.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn update(&self, update: UserUpdate) -> Result<User> {
        update.validate()?;
        let user = self
            .remote
            .update_me(&update)
            .await
            .inspect_err(|e| warn!("Profile update failed: {}", e))?;
        self.current.send_replace(Some(user.clone()));
        Ok(user)
    }
}
