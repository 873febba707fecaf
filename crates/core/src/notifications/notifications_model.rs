//! Notification rule domain models.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};
use crate::patch::Patch;
use crate::validation::{FieldValidator, MinValueValidator, ValidationResult, WeekdayMaskValidator};

/// Recurrence kind of a reminder. This is the `frequency` tag on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationFrequency {
    Once,
    Daily,
    WeekdayOnly,
    EveryNDays,
    Custom,
}

impl NotificationFrequency {
    pub const ALL: [NotificationFrequency; 5] = [
        NotificationFrequency::Once,
        NotificationFrequency::Daily,
        NotificationFrequency::WeekdayOnly,
        NotificationFrequency::EveryNDays,
        NotificationFrequency::Custom,
    ];

    /// Wire tag. Both directions of (de)serialization go through this table.
    pub const fn as_str(self) -> &'static str {
        match self {
            NotificationFrequency::Once => "ONCE",
            NotificationFrequency::Daily => "DAILY",
            NotificationFrequency::WeekdayOnly => "WEEKDAY_ONLY",
            NotificationFrequency::EveryNDays => "EVERY_N_DAYS",
            NotificationFrequency::Custom => "CUSTOM",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|frequency| frequency.as_str() == tag)
    }
}

const FREQUENCY_NAMES: [&str; 5] = {
    let mut names = [""; 5];
    let mut i = 0;
    while i < names.len() {
        names[i] = NotificationFrequency::ALL[i].as_str();
        i += 1;
    }
    names
};

impl fmt::Display for NotificationFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(s).ok_or_else(|| {
            Error::invalid_input(format!("Unsupported notification frequency '{}'", s))
        })
    }
}

impl Serialize for NotificationFrequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NotificationFrequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Self::from_tag(&tag).ok_or_else(|| {
            serde::de::Error::unknown_variant(&tag, &FREQUENCY_NAMES)
        })
    }
}

/// Validated Monday-first selection of weekdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayMask([bool; 7]);

impl WeekdayMask {
    /// Builds a mask from 0/1 flags, enforcing length 7, binary values and
    /// at least one selected day.
    pub fn from_flags(flags: &[i32]) -> Result<Self> {
        if let ValidationResult::Invalid(message) = WeekdayMaskValidator.validate(&flags.to_vec())
        {
            return Err(ValidationError::field("weekdays", message).into());
        }
        let mut days = [false; 7];
        for (day, flag) in days.iter_mut().zip(flags) {
            *day = *flag == 1;
        }
        Ok(Self(days))
    }

    pub fn from_weekdays(weekdays: &[Weekday]) -> Result<Self> {
        let mut flags = vec![0; 7];
        for weekday in weekdays {
            flags[weekday.num_days_from_monday() as usize] = 1;
        }
        Self::from_flags(&flags)
    }

    pub fn flags(&self) -> Vec<i32> {
        self.0.iter().map(|set| i32::from(*set)).collect()
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0[weekday.num_days_from_monday() as usize]
    }

    pub fn selected(&self) -> Vec<Weekday> {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .filter(|day| self.contains(*day))
        .collect()
    }
}

impl TryFrom<Vec<i32>> for WeekdayMask {
    type Error = Error;

    fn try_from(flags: Vec<i32>) -> Result<Self> {
        Self::from_flags(&flags)
    }
}

impl Serialize for WeekdayMask {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.flags().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WeekdayMask {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let flags = Vec::<i32>::deserialize(deserializer)?;
        Self::from_flags(&flags).map_err(serde::de::Error::custom)
    }
}

/// Variant payload of a rule. Exactly one is active, and the frequency tag is
/// derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recurrence {
    Once,
    Daily,
    WeekdayOnly,
    EveryNDays { every_n: u32 },
    Custom { weekdays: WeekdayMask },
}

impl Recurrence {
    pub fn frequency(&self) -> NotificationFrequency {
        match self {
            Recurrence::Once => NotificationFrequency::Once,
            Recurrence::Daily => NotificationFrequency::Daily,
            Recurrence::WeekdayOnly => NotificationFrequency::WeekdayOnly,
            Recurrence::EveryNDays { .. } => NotificationFrequency::EveryNDays,
            Recurrence::Custom { .. } => NotificationFrequency::Custom,
        }
    }

    pub fn every_n(&self) -> Option<u32> {
        match self {
            Recurrence::EveryNDays { every_n } => Some(*every_n),
            _ => None,
        }
    }

    pub fn weekdays(&self) -> Option<&WeekdayMask> {
        match self {
            Recurrence::Custom { weekdays } => Some(weekdays),
            _ => None,
        }
    }

    /// Builds the variant for `frequency` from flat fields. The payload must
    /// match the tag exactly: extra or missing fields are rejected.
    pub fn from_parts(
        frequency: NotificationFrequency,
        every_n: Option<i64>,
        weekdays: Option<Vec<i32>>,
    ) -> Result<Self> {
        match (frequency, every_n, weekdays) {
            (NotificationFrequency::Once, None, None) => Ok(Recurrence::Once),
            (NotificationFrequency::Daily, None, None) => Ok(Recurrence::Daily),
            (NotificationFrequency::WeekdayOnly, None, None) => Ok(Recurrence::WeekdayOnly),
            (NotificationFrequency::EveryNDays, Some(every_n), None) => {
                let every_n = validate_every_n(every_n)?;
                Ok(Recurrence::EveryNDays { every_n })
            }
            (NotificationFrequency::Custom, None, Some(flags)) => Ok(Recurrence::Custom {
                weekdays: WeekdayMask::from_flags(&flags)?,
            }),
            (frequency, every_n, weekdays) => Err(Error::invalid_input(format!(
                "Frequency {} does not match payload (every_n: {}, weekdays: {})",
                frequency,
                every_n.is_some(),
                weekdays.is_some()
            ))),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Recurrence::EveryNDays { every_n } = self {
            validate_every_n(i64::from(*every_n))?;
        }
        Ok(())
    }
}

fn validate_every_n(every_n: i64) -> Result<u32> {
    if let ValidationResult::Invalid(message) = MinValueValidator::new(1).validate(&every_n) {
        return Err(ValidationError::field("every_n", message).into());
    }
    u32::try_from(every_n)
        .map_err(|_| ValidationError::field("every_n", "Interval is too large").into())
}

/// Domain model representing a reminder rule. `time_of_day` is device-local.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRule {
    pub id: String,
    pub time_of_day: NaiveTime,
    pub enabled: bool,
    pub recurrence: Recurrence,
}

impl NotificationRule {
    pub fn frequency(&self) -> NotificationFrequency {
        self.recurrence.frequency()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotificationRuleView<'a> {
    id: &'a str,
    time_of_day: NaiveTime,
    enabled: bool,
    frequency: NotificationFrequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    every_n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weekdays: Option<&'a WeekdayMask>,
}

impl Serialize for NotificationRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        NotificationRuleView {
            id: &self.id,
            time_of_day: self.time_of_day,
            enabled: self.enabled,
            frequency: self.frequency(),
            every_n: self.recurrence.every_n(),
            weekdays: self.recurrence.weekdays(),
        }
        .serialize(serializer)
    }
}

/// Input model for creating a rule. The server assigns `id` and `enabled`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRuleCreate {
    pub time_of_day: NaiveTime,
    pub recurrence: Recurrence,
}

impl NotificationRuleCreate {
    pub fn new(time_of_day: NaiveTime, recurrence: Recurrence) -> Self {
        Self {
            time_of_day,
            recurrence,
        }
    }

    pub fn frequency(&self) -> NotificationFrequency {
        self.recurrence.frequency()
    }

    pub fn validate(&self) -> Result<()> {
        self.recurrence.validate()
    }
}

/// Partial update of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationRuleUpdate {
    pub time_of_day: Patch<NaiveTime>,
    pub frequency: Patch<NotificationFrequency>,
    pub every_n: Patch<u32>,
    pub weekdays: Patch<WeekdayMask>,
    pub enabled: Patch<bool>,
}

impl NotificationRuleUpdate {
    /// Update that only flips the enabled flag.
    pub fn set_enabled(enabled: bool) -> Self {
        Self {
            enabled: Patch::Set(enabled),
            ..Default::default()
        }
    }

    /// Update that replaces the whole schedule, clearing the payload fields
    /// the new frequency does not use.
    pub fn replace_schedule(time_of_day: NaiveTime, recurrence: &Recurrence) -> Self {
        Self {
            time_of_day: Patch::Set(time_of_day),
            frequency: Patch::Set(recurrence.frequency()),
            every_n: recurrence.every_n().into(),
            weekdays: recurrence.weekdays().copied().into(),
            enabled: Patch::Unchanged,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.time_of_day.is_unchanged()
            && self.frequency.is_unchanged()
            && self.every_n.is_unchanged()
            && self.weekdays.is_unchanged()
            && self.enabled.is_unchanged()
    }

    pub fn validate(&self) -> Result<()> {
        for (field, cleared) in [
            ("time_of_day", self.time_of_day.is_clear()),
            ("frequency", self.frequency.is_clear()),
            ("enabled", self.enabled.is_clear()),
        ] {
            if cleared {
                return Err(ValidationError::field(field, "Field cannot be cleared").into());
            }
        }
        if let Patch::Set(every_n) = self.every_n {
            validate_every_n(i64::from(every_n))?;
        }
        match self.frequency {
            Patch::Set(NotificationFrequency::EveryNDays) if self.every_n.as_set().is_none() => {
                Err(ValidationError::field(
                    "every_n",
                    "Value for days interval is required when frequency is EVERY_N_DAYS",
                )
                .into())
            }
            Patch::Set(NotificationFrequency::Custom) if self.weekdays.as_set().is_none() => {
                Err(ValidationError::field(
                    "weekdays",
                    "Weekdays are required when frequency is CUSTOM",
                )
                .into())
            }
            _ => Ok(()),
        }
    }
}
