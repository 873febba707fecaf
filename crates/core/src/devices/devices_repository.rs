use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use super::devices_model::{device_meta, DeviceRegistration};
use super::devices_traits::{DeviceRemoteTrait, DeviceTokenRepositoryTrait};
use crate::errors::{Result, ValidationError};

pub struct DeviceTokenRepository {
    remote: Arc<dyn DeviceRemoteTrait>,
    app_version: String,
}

impl DeviceTokenRepository {
    pub fn new(remote: Arc<dyn DeviceRemoteTrait>, app_version: impl Into<String>) -> Self {
        Self {
            remote,
            app_version: app_version.into(),
        }
    }
}

#[async_trait]
impl DeviceTokenRepositoryTrait for DeviceTokenRepository {
    async fn save_current_token(&self, push_token: &str) -> Result<()> {
        let push_token = push_token.trim();
        if push_token.is_empty() {
            return Err(ValidationError::field("push_token", "Push token is required").into());
        }
        let registration = DeviceRegistration {
            meta: device_meta(&self.app_version),
            push_token: push_token.to_string(),
        };
        self.remote
            .register_device(&registration)
            .await
            .inspect_err(|e| warn!("Failed to register device token: {}", e))?;
        info!("Registered device ({})", registration.meta);
        Ok(())
    }
}
