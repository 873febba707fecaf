//! Product domain models.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::patch::Patch;
use crate::validation::{FieldValidator, RequiredValidator, ValidationResult};

/// Domain model representing a skincare product owned by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: Option<String>,
    pub purpose: Option<String>,
    pub description: Option<String>,
}

/// Input model for creating a new product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub brand: Option<String>,
    pub purpose: Option<String>,
    pub description: Option<String>,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }
}

/// Partial update of a product. `name` may be changed but never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: Patch<String>,
    pub brand: Patch<String>,
    pub purpose: Patch<String>,
    pub description: Patch<String>,
}

impl ProductUpdate {
    pub fn validate(&self) -> Result<()> {
        match &self.name {
            Patch::Clear => Err(ValidationError::field("name", "Field cannot be cleared").into()),
            Patch::Set(name) => validate_name(name),
            Patch::Unchanged => Ok(()),
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    match RequiredValidator::new("Name is required").validate(&name.to_owned()) {
        ValidationResult::Valid => Ok(()),
        ValidationResult::Invalid(message) => Err(ValidationError::field("name", message).into()),
    }
}
