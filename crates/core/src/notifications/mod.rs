//! Notifications module - reminder rule models, scheduling, repository, and traits.

mod notifications_model;
mod notifications_repository;
mod notifications_traits;
mod schedule;

#[cfg(test)]
mod notifications_repository_tests;

pub use notifications_model::{
    NotificationFrequency, NotificationRule, NotificationRuleCreate, NotificationRuleUpdate,
    Recurrence, WeekdayMask,
};
pub use notifications_repository::NotificationRuleRepository;
pub use notifications_traits::{NotificationRuleRemoteTrait, NotificationRuleRepositoryTrait};
pub use schedule::next_occurrence;
