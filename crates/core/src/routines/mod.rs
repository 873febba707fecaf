//! Routines module - routine log models, cached repository, and traits.

mod routines_model;
mod routines_repository;
mod routines_traits;

#[cfg(test)]
mod routines_tests;

pub use routines_model::{Routine, RoutineCreate, RoutineFilter, RoutineType, RoutineUpdate};
pub use routines_repository::RoutineRepository;
pub use routines_traits::{RoutineRemoteTrait, RoutineRepositoryTrait};
