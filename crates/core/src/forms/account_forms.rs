//! Login, registration and profile forms.

use std::sync::Arc;

use super::form_field::{validate_all, FormFieldState, OnChange};
use crate::patch::Patch;
use crate::users::{email_validator, User, UserRegistration, UserUpdate};
use crate::validation::{
    CompositeValidator, FieldValidator, MatchValidator, PasswordValidator, RequiredValidator,
};

pub(crate) fn noop() -> OnChange {
    Arc::new(|| {})
}

/// Empty text field sharing the form's change callback.
pub(crate) fn text(
    validator: impl FieldValidator<String> + 'static,
    on_change: &OnChange,
) -> FormFieldState<String> {
    FormFieldState::new(String::new(), validator).with_on_change(Arc::clone(on_change))
}

pub struct LoginForm {
    pub email: FormFieldState<String>,
    pub password: FormFieldState<String>,
}

impl LoginForm {
    pub fn new(on_change: OnChange) -> Self {
        Self {
            email: text(email_validator(), &on_change),
            password: text(RequiredValidator::new("Password is required"), &on_change),
        }
    }

    pub fn validate_all(&mut self) -> bool {
        validate_all(&mut [&mut self.email, &mut self.password])
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new(noop())
    }
}

pub struct RegisterForm {
    pub email: FormFieldState<String>,
    pub name: FormFieldState<String>,
    pub surname: FormFieldState<String>,
    pub username: FormFieldState<String>,
    pub password: FormFieldState<String>,
    pub confirm_password: FormFieldState<String>,
}

impl RegisterForm {
    pub fn new(on_change: OnChange) -> Self {
        let password = text(
            CompositeValidator::new()
                .with(RequiredValidator::new("Password is required"))
                .with(PasswordValidator),
            &on_change,
        );
        let confirm_password = text(
            CompositeValidator::new()
                .with(RequiredValidator::new("Please confirm your password"))
                .with(MatchValidator::with_message(
                    password.value_provider(),
                    "Passwords do not match",
                )),
            &on_change,
        );
        Self {
            email: text(email_validator(), &on_change),
            name: text(RequiredValidator::new("Name is required"), &on_change),
            surname: text(RequiredValidator::new("Surname is required"), &on_change),
            username: text(RequiredValidator::new("Username is required"), &on_change),
            password,
            confirm_password,
        }
    }

    pub fn validate_all(&mut self) -> bool {
        validate_all(&mut [
            &mut self.email,
            &mut self.name,
            &mut self.surname,
            &mut self.username,
            &mut self.password,
            &mut self.confirm_password,
        ])
    }

    pub fn to_registration(&self) -> UserRegistration {
        UserRegistration {
            email: self.email.value().trim().to_string(),
            name: self.name.value().trim().to_string(),
            surname: self.surname.value().trim().to_string(),
            username: self.username.value().trim().to_string(),
            password: self.password.value(),
        }
    }
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new(noop())
    }
}

pub struct ProfileForm {
    pub email: FormFieldState<String>,
    pub name: FormFieldState<String>,
    pub surname: FormFieldState<String>,
}

impl ProfileForm {
    pub fn new(on_change: OnChange) -> Self {
        Self {
            email: text(email_validator(), &on_change),
            name: text(RequiredValidator::new("Name is required"), &on_change),
            surname: text(RequiredValidator::new("Surname is required"), &on_change),
        }
    }

    pub fn fill(&mut self, user: &User) {
        self.email.set_value(user.email.clone());
        self.name.set_value(user.name.clone());
        self.surname.set_value(user.surname.clone());
    }

    pub fn validate_all(&mut self) -> bool {
        validate_all(&mut [&mut self.email, &mut self.name, &mut self.surname])
    }

    /// Sends all three fields, as the profile screen edits them together.
    pub fn to_update(&self) -> UserUpdate {
        UserUpdate {
            email: Patch::Set(self.email.value().trim().to_string()),
            name: Patch::Set(self.name.value().trim().to_string()),
            surname: Patch::Set(self.surname.value().trim().to_string()),
        }
    }
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self::new(noop())
    }
}
