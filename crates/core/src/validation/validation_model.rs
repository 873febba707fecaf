//! Validation result and the validator contract.

/// Outcome of running a validator against a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

impl ValidationResult {
    pub fn invalid(message: impl Into<String>) -> Self {
        ValidationResult::Invalid(message.into())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// The error message, if invalid.
    pub fn error(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(message) => Some(message),
        }
    }
}

/// A pure check of a single value.
pub trait FieldValidator<T: ?Sized>: Send + Sync {
    fn validate(&self, value: &T) -> ValidationResult;
}

/// Owned, type-erased validator as stored by form fields.
pub type BoxedValidator<T> = Box<dyn FieldValidator<T>>;

impl<T: ?Sized> FieldValidator<T> for BoxedValidator<T> {
    fn validate(&self, value: &T) -> ValidationResult {
        (**self).validate(value)
    }
}

/// Runs validators in order and stops at the first failure.
pub struct CompositeValidator<T: ?Sized> {
    validators: Vec<BoxedValidator<T>>,
}

impl<T: ?Sized> CompositeValidator<T> {
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Appends a validator to the end of the chain.
    pub fn with(mut self, validator: impl FieldValidator<T> + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl<T: ?Sized> Default for CompositeValidator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> FieldValidator<T> for CompositeValidator<T> {
    fn validate(&self, value: &T) -> ValidationResult {
        for validator in &self.validators {
            let result = validator.validate(value);
            if !result.is_valid() {
                return result;
            }
        }
        ValidationResult::Valid
    }
}
