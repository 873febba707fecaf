//! Forms module - field state and the input forms of each screen.

mod account_forms;
mod form_field;
mod notification_rule_form;
mod product_form;
mod routine_form;


pub use account_forms::{LoginForm, ProfileForm, RegisterForm};
pub use form_field::{validate_all, FormFieldState, OnChange, Validate};
pub use notification_rule_form::NotificationRuleForm;
pub use product_form::ProductForm;
pub use routine_form::RoutineForm;
