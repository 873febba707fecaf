//! User profile models.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Result, ValidationError};
use crate::patch::Patch;
use crate::validation::{
    CompositeValidator, EmailValidator, FieldValidator, PasswordValidator, RequiredValidator,
    ValidationResult,
};

/// The authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub username: String,
}

/// Sign-up payload. The password never appears in [`User`].
#[derive(Clone, PartialEq, Eq)]
pub struct UserRegistration {
    pub email: String,
    pub name: String,
    pub surname: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for UserRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRegistration")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("surname", &self.surname)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl UserRegistration {
    pub fn validate(&self) -> Result<()> {
        check("email", &email_validator(), &self.email)?;
        check("name", &RequiredValidator::new("Name is required"), &self.name)?;
        check("surname", &RequiredValidator::new("Surname is required"), &self.surname)?;
        check(
            "username",
            &RequiredValidator::new("Username is required"),
            &self.username,
        )?;
        let password = CompositeValidator::new()
            .with(RequiredValidator::new("Password is required"))
            .with(PasswordValidator);
        check("password", &password, &self.password)
    }
}

/// Partial update of the profile. None of the fields can be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub email: Patch<String>,
    pub name: Patch<String>,
    pub surname: Patch<String>,
}

impl UserUpdate {
    pub fn validate(&self) -> Result<()> {
        let email = email_validator();
        let name = RequiredValidator::new("Name is required");
        let surname = RequiredValidator::new("Surname is required");
        let fields: [(&str, &Patch<String>, &dyn FieldValidator<String>); 3] = [
            ("email", &self.email, &email),
            ("name", &self.name, &name),
            ("surname", &self.surname, &surname),
        ];
        for (field, patch, validator) in fields {
            match patch {
                Patch::Clear => {
                    return Err(ValidationError::field(field, "Field cannot be cleared").into())
                }
                Patch::Set(value) => check(field, validator, value)?,
                Patch::Unchanged => {}
            }
        }
        Ok(())
    }
}

pub(crate) fn email_validator() -> CompositeValidator<String> {
    CompositeValidator::new()
        .with(RequiredValidator::new("Email is required"))
        .with(EmailValidator)
}

fn check<V>(field: &str, validator: &V, value: &str) -> Result<()>
where
    V: FieldValidator<String> + ?Sized,
{
    match validator.validate(&value.to_owned()) {
        ValidationResult::Valid => Ok(()),
        ValidationResult::Invalid(message) => Err(ValidationError::field(field, message).into()),
    }
}
