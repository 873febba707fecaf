//! Validation module - field validators and their composition.

mod rules;
mod validation_model;

#[cfg(test)]
mod validation_tests;

pub use rules::{
    EmailValidator, MatchValidator, MinValueValidator, NoOpValidator,
    NotEmptyCollectionValidator, PasswordValidator, RequiredValidator, WeekdayMaskValidator,
    PASSWORD_SYMBOLS,
};
pub use validation_model::{BoxedValidator, CompositeValidator, FieldValidator, ValidationResult};
