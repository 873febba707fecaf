use async_trait::async_trait;

use super::devices_model::DeviceRegistration;
use crate::errors::Result;

#[async_trait]
pub trait DeviceRemoteTrait: Send + Sync {
    async fn register_device(&self, registration: &DeviceRegistration) -> Result<()>;
}

#[async_trait]
pub trait DeviceTokenRepositoryTrait: Send + Sync {
    /// Registers `push_token` for this device with the current account.
    async fn save_current_token(&self, push_token: &str) -> Result<()>;
}
