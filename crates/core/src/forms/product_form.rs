use super::account_forms::{noop, text};
use super::form_field::{FormFieldState, OnChange, Validate};
use crate::patch::Patch;
use crate::products::{Product, ProductCreate, ProductUpdate};
use crate::validation::{NoOpValidator, RequiredValidator};

/// Add/edit form for a product. Only the name is mandatory.
pub struct ProductForm {
    pub name: FormFieldState<String>,
    pub brand: FormFieldState<String>,
    pub purpose: FormFieldState<String>,
    pub description: FormFieldState<String>,
}

impl ProductForm {
    pub fn new(on_change: OnChange) -> Self {
        Self {
            name: text(RequiredValidator::new("Name is required"), &on_change),
            brand: text(NoOpValidator, &on_change),
            purpose: text(NoOpValidator, &on_change),
            description: text(NoOpValidator, &on_change),
        }
    }

    pub fn fill(&mut self, product: &Product) {
        self.name.set_value(product.name.clone());
        self.brand.set_value(product.brand.clone().unwrap_or_default());
        self.purpose.set_value(product.purpose.clone().unwrap_or_default());
        self.description
            .set_value(product.description.clone().unwrap_or_default());
    }

    pub fn validate_all(&mut self) -> bool {
        self.name.validate()
    }

    pub fn to_create(&self) -> ProductCreate {
        ProductCreate {
            name: self.name.value().trim().to_string(),
            brand: optional(&self.brand),
            purpose: optional(&self.purpose),
            description: optional(&self.description),
        }
    }

    /// Blank optional fields clear the stored value.
    pub fn to_update(&self) -> ProductUpdate {
        ProductUpdate {
            name: Patch::Set(self.name.value().trim().to_string()),
            brand: optional(&self.brand).into(),
            purpose: optional(&self.purpose).into(),
            description: optional(&self.description).into(),
        }
    }
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::new(noop())
    }
}

fn optional(field: &FormFieldState<String>) -> Option<String> {
    let value = field.value();
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
