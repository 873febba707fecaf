//! Auth module - tokens, login/logout, and the signed-in session.

mod auth_model;
mod auth_repository;
mod auth_traits;
mod token_store;


pub use auth_model::{AuthTokens, LoginCredentials};
pub use auth_repository::{AuthRepository, Session};
pub use auth_traits::{AuthRemoteTrait, AuthRepositoryTrait, TokenStore};
pub use token_store::MemoryTokenStore;
