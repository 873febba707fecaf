//! Products module - domain models, cached repository, and traits.

mod products_model;
mod products_repository;
mod products_traits;


pub use products_model::{Product, ProductCreate, ProductUpdate};
pub use products_repository::ProductRepository;
pub use products_traits::{ProductRemoteTrait, ProductRepositoryTrait};
