//! Per-field form state.

use std::sync::{Arc, PoisonError, RwLock};

use crate::validation::{BoxedValidator, FieldValidator, ValidationResult};

/// Callback fired when the user edits a field.
pub type OnChange = Arc<dyn Fn() + Send + Sync>;

/// Anything that can validate itself and remember the outcome.
pub trait Validate {
    fn validate(&mut self) -> bool;
}

/// Value, error slot and validator of one input.
///
/// The value lives behind a shared lock so that other fields' validators
/// (see [`FormFieldState::value_provider`]) always read the current value.
pub struct FormFieldState<T> {
    value: Arc<RwLock<T>>,
    error: Option<String>,
    validator: BoxedValidator<T>,
    on_change: Option<OnChange>,
}

impl<T: Clone + Send + Sync + 'static> FormFieldState<T> {
    pub fn new(initial: T, validator: impl FieldValidator<T> + 'static) -> Self {
        Self {
            value: Arc::new(RwLock::new(initial)),
            error: None,
            validator: Box::new(validator),
            on_change: None,
        }
    }

    pub fn with_on_change(mut self, on_change: OnChange) -> Self {
        self.on_change = Some(on_change);
        self
    }

    pub fn value(&self) -> T {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// User edit: stores the value, drops the stale error, fires the callback.
    pub fn on_value_change(&mut self, value: T) {
        self.store(value);
        self.error = None;
        if let Some(on_change) = &self.on_change {
            on_change();
        }
    }

    /// Programmatic update, e.g. when filling the form from fetched data.
    pub fn set_value(&mut self, value: T) {
        self.store(value);
    }

    /// Reader of the current value, for validators of dependent fields.
    pub fn value_provider(&self) -> impl Fn() -> T + Send + Sync + 'static {
        let value = Arc::clone(&self.value);
        move || value.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn store(&self, value: T) {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = value;
    }
}

impl<T: Clone + Send + Sync + 'static> Validate for FormFieldState<T> {
    fn validate(&mut self) -> bool {
        let result = {
            let value = self.value.read().unwrap_or_else(PoisonError::into_inner);
            self.validator.validate(&value)
        };
        match result {
            ValidationResult::Valid => {
                self.error = None;
                true
            }
            ValidationResult::Invalid(message) => {
                self.error = Some(message);
                false
            }
        }
    }
}

/// Validates every field, without stopping at the first failure, so each
/// field shows its own error.
pub fn validate_all(fields: &mut [&mut dyn Validate]) -> bool {
    fields
        .iter_mut()
        .fold(true, |all_valid, field| field.validate() && all_valid)
}
