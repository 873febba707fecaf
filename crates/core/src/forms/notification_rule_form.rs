//! Reminder rule form. Only the payload field matching the selected
//! frequency is validated and sent.

use chrono::NaiveTime;

use super::account_forms::noop;
use super::form_field::{validate_all, FormFieldState, OnChange, Validate};
use crate::errors::Result;
use crate::notifications::{
    NotificationFrequency, NotificationRule, NotificationRuleCreate, NotificationRuleUpdate,
    Recurrence,
};
use crate::validation::{MinValueValidator, NoOpValidator, WeekdayMaskValidator};

/// Add/edit form for a reminder rule. `time` is device-local.
pub struct NotificationRuleForm {
    pub time: FormFieldState<NaiveTime>,
    pub frequency: FormFieldState<NotificationFrequency>,
    pub every_n: FormFieldState<i64>,
    pub weekdays: FormFieldState<Vec<i32>>,
}

impl NotificationRuleForm {
    pub fn new(time: NaiveTime, on_change: OnChange) -> Self {
        Self {
            time: FormFieldState::new(time, NoOpValidator).with_on_change(on_change.clone()),
            frequency: FormFieldState::new(NotificationFrequency::Daily, NoOpValidator)
                .with_on_change(on_change.clone()),
            every_n: FormFieldState::new(1, MinValueValidator::new(1))
                .with_on_change(on_change.clone()),
            weekdays: FormFieldState::new(vec![0; 7], WeekdayMaskValidator)
                .with_on_change(on_change),
        }
    }

    pub fn at(time: NaiveTime) -> Self {
        Self::new(time, noop())
    }

    pub fn fill(&mut self, rule: &NotificationRule) {
        self.time.set_value(rule.time_of_day);
        self.frequency.set_value(rule.frequency());
        if let Some(every_n) = rule.recurrence.every_n() {
            self.every_n.set_value(i64::from(every_n));
        }
        if let Some(weekdays) = rule.recurrence.weekdays() {
            self.weekdays.set_value(weekdays.flags());
        }
    }

    /// Validates only the payload field the selected frequency uses.
    pub fn validate_all(&mut self) -> bool {
        match self.frequency.value() {
            NotificationFrequency::EveryNDays => {
                validate_all(&mut [&mut self.time, &mut self.every_n])
            }
            NotificationFrequency::Custom => {
                validate_all(&mut [&mut self.time, &mut self.weekdays])
            }
            _ => self.time.validate(),
        }
    }

    pub fn recurrence(&self) -> Result<Recurrence> {
        let frequency = self.frequency.value();
        let every_n =
            (frequency == NotificationFrequency::EveryNDays).then(|| self.every_n.value());
        let weekdays = (frequency == NotificationFrequency::Custom).then(|| self.weekdays.value());
        Recurrence::from_parts(frequency, every_n, weekdays)
    }

    pub fn to_create(&self) -> Result<NotificationRuleCreate> {
        Ok(NotificationRuleCreate::new(self.time.value(), self.recurrence()?))
    }

    pub fn to_update(&self) -> Result<NotificationRuleUpdate> {
        Ok(NotificationRuleUpdate::replace_schedule(
            self.time.value(),
            &self.recurrence()?,
        ))
    }
}
