//! Users module - account models and the profile repository.

mod users_model;
mod users_repository;
mod users_traits;

#[cfg(test)]
mod users_tests;

pub(crate) use users_model::email_validator;
pub use users_model::{User, UserRegistration, UserUpdate};
pub use users_repository::UserRepository;
pub use users_traits::{UserRemoteTrait, UserRepositoryTrait};
