use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::watch;

use super::notifications_model::{NotificationRule, NotificationRuleCreate, NotificationRuleUpdate};
use super::notifications_traits::{NotificationRuleRemoteTrait, NotificationRuleRepositoryTrait};
use crate::cache::{CachedList, Cleanable, Identifiable};
use crate::errors::Result;

impl Identifiable for NotificationRule {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Repository for reminder rules backed by the remote service.
///
/// A failed remote call leaves the cache exactly as it was.
pub struct NotificationRuleRepository {
    remote: Arc<dyn NotificationRuleRemoteTrait>,
    cache: CachedList<NotificationRule>,
}

impl NotificationRuleRepository {
    pub fn new(remote: Arc<dyn NotificationRuleRemoteTrait>) -> Self {
        Self {
            remote,
            cache: CachedList::new(),
        }
    }
}

impl Cleanable for NotificationRuleRepository {
    fn clear(&self) {
        self.cache.clear();
    }
}

#[async_trait]
impl NotificationRuleRepositoryTrait for NotificationRuleRepository {
    fn rules(&self) -> Vec<NotificationRule> {
        self.cache.snapshot()
    }

    fn subscribe(&self) -> watch::Receiver<Vec<NotificationRule>> {
        self.cache.subscribe()
    }

    async fn add(&self, rule: NotificationRuleCreate) -> Result<NotificationRule> {
        rule.validate()?;
        debug!("Adding {} notification rule at {}", rule.frequency(), rule.time_of_day);

        let created = self.remote.add_rule(&rule).await.inspect_err(|e| {
            warn!("Failed to add notification rule: {}", e);
        })?;
        self.cache.prepend(created.clone());
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<NotificationRule>> {
        let rules = self.remote.list_rules().await?;
        debug!("Fetched {} notification rules", rules.len());
        self.cache.replace_all(rules.clone());
        Ok(rules)
    }

    async fn update(
        &self,
        rule_id: &str,
        update: NotificationRuleUpdate,
    ) -> Result<NotificationRule> {
        update.validate()?;
        let updated = self
            .remote
            .update_rule(rule_id, &update)
            .await
            .inspect_err(|e| warn!("Failed to update notification rule {}: {}", rule_id, e))?;
        self.cache.replace(updated.clone());
        Ok(updated)
    }

    async fn delete(&self, rule_id: &str) -> Result<()> {
        self.remote
            .delete_rule(rule_id)
            .await
            .inspect_err(|e| warn!("Failed to delete notification rule {}: {}", rule_id, e))?;
        self.cache.remove(rule_id);
        Ok(())
    }

    async fn details(&self, rule_id: &str) -> Result<NotificationRule> {
        let rule = self.remote.get_rule(rule_id).await?;
        self.cache.replace(rule.clone());
        Ok(rule)
    }
}
