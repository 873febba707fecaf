//! Single-purpose field validators.

use regex::Regex;
use std::sync::{Arc, LazyLock};

use super::validation_model::{FieldValidator, ValidationResult};

/// Symbols accepted as the "special character" of a password.
pub const PASSWORD_SYMBOLS: &str = "#?!@$%^&*-";

const PASSWORD_MIN_LENGTH: usize = 8;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
    )
    .expect("email pattern is a valid regex")
});

/// Rejects blank strings.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new("Field is required")
    }
}

impl FieldValidator<String> for RequiredValidator {
    fn validate(&self, value: &String) -> ValidationResult {
        if value.trim().is_empty() {
            ValidationResult::invalid(&self.message)
        } else {
            ValidationResult::Valid
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl FieldValidator<String> for EmailValidator {
    fn validate(&self, value: &String) -> ValidationResult {
        if EMAIL_REGEX.is_match(value) {
            ValidationResult::Valid
        } else {
            ValidationResult::invalid("Invalid email address format")
        }
    }
}

/// At least 8 characters with an upper-case letter, a lower-case letter,
/// a digit and one of [`PASSWORD_SYMBOLS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordValidator;

impl FieldValidator<String> for PasswordValidator {
    fn validate(&self, value: &String) -> ValidationResult {
        let long_enough = !value.contains('\n') && value.chars().count() >= PASSWORD_MIN_LENGTH;
        let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
        let has_digit = value.chars().any(|c| c.is_ascii_digit());
        let has_symbol = value.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

        if long_enough && has_upper && has_lower && has_digit && has_symbol {
            ValidationResult::Valid
        } else {
            ValidationResult::invalid(
                "Password must be at least 8 characters long, \
                 contain at least one uppercase letter, one lowercase letter, \
                 one digit, and one special character.",
            )
        }
    }
}

/// Compares against another field's value, read at validation time.
#[derive(Clone)]
pub struct MatchValidator {
    target: Arc<dyn Fn() -> String + Send + Sync>,
    message: String,
}

impl MatchValidator {
    pub fn new(target: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self::with_message(target, "Fields do not match")
    }

    pub fn with_message(
        target: impl Fn() -> String + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        Self {
            target: Arc::new(target),
            message: message.into(),
        }
    }
}

impl FieldValidator<String> for MatchValidator {
    fn validate(&self, value: &String) -> ValidationResult {
        if *value == (self.target)() {
            ValidationResult::Valid
        } else {
            ValidationResult::invalid(&self.message)
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MinValueValidator {
    min: i64,
}

impl MinValueValidator {
    pub fn new(min: i64) -> Self {
        Self { min }
    }
}

impl FieldValidator<i64> for MinValueValidator {
    fn validate(&self, value: &i64) -> ValidationResult {
        if *value >= self.min {
            ValidationResult::Valid
        } else {
            ValidationResult::invalid(format!("Value must be at least {}", self.min))
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotEmptyCollectionValidator {
    message: String,
}

impl NotEmptyCollectionValidator {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for NotEmptyCollectionValidator {
    fn default() -> Self {
        Self::new("Selection cannot be empty")
    }
}

impl<E> FieldValidator<Vec<E>> for NotEmptyCollectionValidator {
    fn validate(&self, value: &Vec<E>) -> ValidationResult {
        if value.is_empty() {
            ValidationResult::invalid(&self.message)
        } else {
            ValidationResult::Valid
        }
    }
}

/// Monday-first 7-element mask of 0/1 flags with at least one day set.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekdayMaskValidator;

impl FieldValidator<Vec<i32>> for WeekdayMaskValidator {
    fn validate(&self, value: &Vec<i32>) -> ValidationResult {
        if value.len() != 7 {
            return ValidationResult::invalid("Weekday mask must have exactly 7 elements");
        }
        if value.iter().any(|d| *d != 0 && *d != 1) {
            return ValidationResult::invalid("Weekday mask can only contain 0s and 1s");
        }
        if value.iter().any(|d| *d == 1) {
            ValidationResult::Valid
        } else {
            ValidationResult::invalid("At least one day must be selected")
        }
    }
}

/// Accepts everything; used for free-form fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpValidator;

impl<T: ?Sized> FieldValidator<T> for NoOpValidator {
    fn validate(&self, _value: &T) -> ValidationResult {
        ValidationResult::Valid
    }
}
