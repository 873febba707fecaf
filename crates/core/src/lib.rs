//! Skincare Core - Domain models, validation, forms, screen state, and cached repositories.
//!
//! This crate holds the client-side logic of the skincare tracker. It is
//! transport-agnostic: remote collaborators are described by the
//! `*RemoteTrait` traits and implemented by the `skincare-api-client` crate.

pub mod auth;
pub mod cache;
pub mod constants;
pub mod devices;
pub mod errors;
pub mod forms;
pub mod notifications;
pub mod pagination;
pub mod patch;
pub mod products;
pub mod routines;
pub mod state;
pub mod users;
pub mod utils;
pub mod validation;

// Re-export common types
pub use pagination::Page;
pub use patch::Patch;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
