//! Notification rule remote and repository traits.

use async_trait::async_trait;
use tokio::sync::watch;

use super::notifications_model::{NotificationRule, NotificationRuleCreate, NotificationRuleUpdate};
use crate::cache::Cleanable;
use crate::errors::Result;

/// Contract for the remote notification rule collection.
///
/// Implementations own the mapping between domain types and wire DTOs,
/// including the device-local/UTC time conversion.
#[async_trait]
pub trait NotificationRuleRemoteTrait: Send + Sync {
    async fn add_rule(&self, rule: &NotificationRuleCreate) -> Result<NotificationRule>;

    /// Fetches the whole collection; rules are not paginated.
    async fn list_rules(&self) -> Result<Vec<NotificationRule>>;

    async fn get_rule(&self, rule_id: &str) -> Result<NotificationRule>;

    async fn update_rule(
        &self,
        rule_id: &str,
        update: &NotificationRuleUpdate,
    ) -> Result<NotificationRule>;

    async fn delete_rule(&self, rule_id: &str) -> Result<()>;
}

/// Remote operations plus a local mirror of the last known rules.
#[async_trait]
pub trait NotificationRuleRepositoryTrait: Cleanable {
    /// Cached rules, newest additions first.
    fn rules(&self) -> Vec<NotificationRule>;

    fn subscribe(&self) -> watch::Receiver<Vec<NotificationRule>>;

    async fn add(&self, rule: NotificationRuleCreate) -> Result<NotificationRule>;

    async fn list(&self) -> Result<Vec<NotificationRule>>;

    async fn update(
        &self,
        rule_id: &str,
        update: NotificationRuleUpdate,
    ) -> Result<NotificationRule>;

    async fn delete(&self, rule_id: &str) -> Result<()>;

    async fn details(&self, rule_id: &str) -> Result<NotificationRule>;
}
