//! Routine domain models.

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};
use crate::patch::Patch;
use crate::products::Product;
use crate::validation::{FieldValidator, NotEmptyCollectionValidator, ValidationResult};

/// Part of the day a routine belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutineType {
    Morning,
    Night,
    Daily,
    Other,
}

impl RoutineType {
    pub const ALL: [RoutineType; 4] = [
        RoutineType::Morning,
        RoutineType::Night,
        RoutineType::Daily,
        RoutineType::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            RoutineType::Morning => "MORNING",
            RoutineType::Night => "NIGHT",
            RoutineType::Daily => "DAILY",
            RoutineType::Other => "OTHER",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// Default type offered for a routine logged at `time`:
    /// 05-11 morning, 18-23 night, daily otherwise.
    pub fn suggested_for(time: NaiveTime) -> Self {
        match time.hour() {
            5..=11 => RoutineType::Morning,
            18..=23 => RoutineType::Night,
            _ => RoutineType::Daily,
        }
    }
}

const ROUTINE_TYPE_NAMES: [&str; 4] = {
    let mut names = [""; 4];
    let mut i = 0;
    while i < names.len() {
        names[i] = RoutineType::ALL[i].as_str();
        i += 1;
    }
    names
};

impl fmt::Display for RoutineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoutineType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(&s.to_ascii_uppercase())
            .ok_or_else(|| Error::invalid_input(format!("Unsupported routine type '{}'", s)))
    }
}

impl Serialize for RoutineType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RoutineType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Self::from_tag(&tag)
            .ok_or_else(|| serde::de::Error::unknown_variant(&tag, &ROUTINE_TYPE_NAMES))
    }
}

/// A logged skincare session.
///
/// `products` may be empty when every referenced product was deleted
/// server-side after the routine was logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub id: String,
    #[serde(rename = "type")]
    pub routine_type: RoutineType,
    pub notes: Option<String>,
    pub performed_at: DateTime<Utc>,
    pub products: Vec<Product>,
}

impl Routine {
    pub fn product_ids(&self) -> Vec<String> {
        self.products.iter().map(|p| p.id.clone()).collect()
    }
}

/// Input model for logging a routine. Without a type, the server infers one
/// from `performed_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineCreate {
    #[serde(rename = "type")]
    pub routine_type: Option<RoutineType>,
    pub notes: Option<String>,
    pub performed_at: DateTime<Utc>,
    pub product_ids: Vec<String>,
}

impl RoutineCreate {
    pub fn new(performed_at: DateTime<Utc>, product_ids: Vec<String>) -> Self {
        Self {
            routine_type: None,
            notes: None,
            performed_at,
            product_ids,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_product_ids(&self.product_ids)
    }
}

/// Partial update of a routine. Only `notes` may be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutineUpdate {
    pub routine_type: Patch<RoutineType>,
    pub notes: Patch<String>,
    pub performed_at: Patch<DateTime<Utc>>,
    pub product_ids: Patch<Vec<String>>,
}

impl RoutineUpdate {
    pub fn validate(&self) -> Result<()> {
        for (field, cleared) in [
            ("type", self.routine_type.is_clear()),
            ("performed_at", self.performed_at.is_clear()),
            ("product_ids", self.product_ids.is_clear()),
        ] {
            if cleared {
                return Err(ValidationError::field(field, "Field cannot be cleared").into());
            }
        }
        match &self.product_ids {
            Patch::Set(ids) => validate_product_ids(ids),
            _ => Ok(()),
        }
    }
}

/// Time window applied to the routine listing. Both bounds are optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutineFilter {
    pub performed_after: Option<DateTime<Utc>>,
    pub performed_before: Option<DateTime<Utc>>,
}

impl RoutineFilter {
    pub fn validate(&self) -> Result<()> {
        match (self.performed_after, self.performed_before) {
            (Some(after), Some(before)) if after > before => Err(Error::invalid_input(
                "performed_after must not be later than performed_before",
            )),
            _ => Ok(()),
        }
    }
}

fn validate_product_ids(ids: &[String]) -> Result<()> {
    match NotEmptyCollectionValidator::new("Select at least one product").validate(&ids.to_vec()) {
        ValidationResult::Valid => Ok(()),
        ValidationResult::Invalid(message) => {
            Err(ValidationError::field("product_ids", message).into())
        }
    }
}
