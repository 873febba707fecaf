//! Tests for the notification rule repository cache behavior.

#[cfg(test)]
mod tests {
    use crate::cache::Cleanable;
    use crate::errors::{Error, RemoteError, Result};
    use crate::notifications::*;
    use async_trait::async_trait;
    use chrono::NaiveTime;
    use std::sync::{Arc, Mutex};

    // ==================== Mock Remote ====================

    #[derive(Default)]
    struct MockRemote {
        rules: Mutex<Vec<NotificationRule>>,
        calls: Mutex<Vec<String>>,
        fail: Mutex<bool>,
        next_id: Mutex<u32>,
    }

    impl MockRemote {
        fn with_rules(rules: Vec<NotificationRule>) -> Arc<Self> {
            let remote = Self::default();
            *remote.rules.lock().unwrap() = rules;
            Arc::new(remote)
        }

        fn set_fail(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: impl Into<String>) -> Result<()> {
            self.calls.lock().unwrap().push(call.into());
            if *self.fail.lock().unwrap() {
                return Err(RemoteError::network("connection refused").into());
            }
            Ok(())
        }

        fn find(&self, rule_id: &str) -> Result<NotificationRule> {
            self.rules
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == rule_id)
                .cloned()
                .ok_or_else(|| Error::NotFound(rule_id.to_string()))
        }
    }

    #[async_trait]
    impl NotificationRuleRemoteTrait for MockRemote {
        async fn add_rule(&self, rule: &NotificationRuleCreate) -> Result<NotificationRule> {
            self.record("add")?;
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let created = NotificationRule {
                id: format!("new-{}", next_id),
                time_of_day: rule.time_of_day,
                enabled: true,
                recurrence: rule.recurrence.clone(),
            };
            self.rules.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn list_rules(&self) -> Result<Vec<NotificationRule>> {
            self.record("list")?;
            Ok(self.rules.lock().unwrap().clone())
        }

        async fn get_rule(&self, rule_id: &str) -> Result<NotificationRule> {
            self.record(format!("get:{}", rule_id))?;
            self.find(rule_id)
        }

        async fn update_rule(
            &self,
            rule_id: &str,
            update: &NotificationRuleUpdate,
        ) -> Result<NotificationRule> {
            self.record(format!("update:{}", rule_id))?;
            let mut rule = self.find(rule_id)?;
            if let Some(enabled) = update.enabled.as_set() {
                rule.enabled = *enabled;
            }
            if let Some(time) = update.time_of_day.as_set() {
                rule.time_of_day = *time;
            }
            Ok(rule)
        }

        async fn delete_rule(&self, rule_id: &str) -> Result<()> {
            self.record(format!("delete:{}", rule_id))?;
            self.rules.lock().unwrap().retain(|r| r.id != rule_id);
            Ok(())
        }
    }

    fn time(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn rule(id: &str, h: u32) -> NotificationRule {
        NotificationRule {
            id: id.to_string(),
            time_of_day: time(h),
            enabled: true,
            recurrence: Recurrence::Daily,
        }
    }

    fn ids(repo: &NotificationRuleRepository) -> Vec<String> {
        repo.rules().into_iter().map(|r| r.id).collect()
    }

    async fn loaded(rules: Vec<NotificationRule>) -> (Arc<MockRemote>, NotificationRuleRepository) {
        let remote = MockRemote::with_rules(rules);
        let repo = NotificationRuleRepository::new(remote.clone());
        repo.list().await.unwrap();
        (remote, repo)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_list_replaces_cache() {
        let (remote, repo) = loaded(vec![rule("a", 8), rule("b", 21)]).await;
        assert_eq!(ids(&repo), vec!["a", "b"]);

        remote.rules.lock().unwrap().retain(|r| r.id == "b");
        repo.list().await.unwrap();
        assert_eq!(ids(&repo), vec!["b"]);
    }

    #[tokio::test]
    async fn test_add_prepends_created_rule() {
        let (_, repo) = loaded(vec![rule("a", 8)]).await;
        let created = repo
            .add(NotificationRuleCreate::new(time(7), Recurrence::WeekdayOnly))
            .await
            .unwrap();

        assert_eq!(created.id, "new-1");
        assert_eq!(ids(&repo), vec!["new-1", "a"]);
    }

    #[tokio::test]
    async fn test_invalid_rule_never_reaches_remote() {
        let (remote, repo) = loaded(vec![]).await;
        let result = repo
            .add(NotificationRuleCreate::new(
                time(7),
                Recurrence::EveryNDays { every_n: 0 },
            ))
            .await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(remote.calls(), vec!["list"]);
        assert!(repo.rules().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_by_id() {
        let (_, repo) = loaded(vec![rule("a", 8), rule("b", 21)]).await;
        let updated = repo
            .update("b", NotificationRuleUpdate::set_enabled(false))
            .await
            .unwrap();

        assert!(!updated.enabled);
        let cached = repo.rules();
        assert_eq!(cached.len(), 2);
        assert!(cached[0].enabled);
        assert!(!cached[1].enabled);
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_cache_unchanged() {
        let (remote, repo) = loaded(vec![rule("a", 8), rule("b", 21)]).await;
        remote.set_fail(true);

        let result = repo.delete("a").await;
        assert!(matches!(result, Err(Error::Remote(RemoteError::Network(_)))));
        assert_eq!(ids(&repo), vec!["a", "b"]);

        remote.set_fail(false);
        repo.delete("a").await.unwrap();
        assert_eq!(ids(&repo), vec!["b"]);
    }

    #[tokio::test]
    async fn test_details_only_replaces_present_entries() {
        let remote = MockRemote::with_rules(vec![rule("a", 8), rule("b", 21)]);
        let repo = NotificationRuleRepository::new(remote.clone());

        let fetched = repo.details("b").await.unwrap();
        assert_eq!(fetched.id, "b");
        assert!(repo.rules().is_empty());

        repo.list().await.unwrap();
        remote.rules.lock().unwrap()[1].time_of_day = time(22);
        repo.details("b").await.unwrap();
        assert_eq!(repo.rules()[1].time_of_day, time(22));
    }

    #[tokio::test]
    async fn test_subscribers_observe_snapshots_and_clear() {
        let (_, repo) = loaded(vec![rule("a", 8)]).await;
        let mut rx = repo.subscribe();
        assert_eq!(rx.borrow_and_update().len(), 1);

        repo.clear();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
    }
}
