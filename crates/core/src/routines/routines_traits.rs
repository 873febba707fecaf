use async_trait::async_trait;
use tokio::sync::watch;

use super::routines_model::{Routine, RoutineCreate, RoutineFilter, RoutineUpdate};
use crate::cache::Cleanable;
use crate::errors::Result;
use crate::pagination::Page;

/// Contract for the remote routine log.
#[async_trait]
pub trait RoutineRemoteTrait: Send + Sync {
    async fn add_routine(&self, routine: &RoutineCreate) -> Result<Routine>;
    async fn list_routines(
        &self,
        limit: u32,
        offset: u32,
        filter: &RoutineFilter,
    ) -> Result<Page<Routine>>;
    async fn get_routine(&self, routine_id: &str) -> Result<Routine>;
    async fn update_routine(&self, routine_id: &str, update: &RoutineUpdate) -> Result<Routine>;
    async fn delete_routine(&self, routine_id: &str) -> Result<()>;
}

#[async_trait]
pub trait RoutineRepositoryTrait: Cleanable {
    fn routines(&self) -> Vec<Routine>;

    fn subscribe(&self) -> watch::Receiver<Vec<Routine>>;

    async fn add(&self, routine: RoutineCreate) -> Result<Routine>;

    /// Same paging rules as products: `offset == 0` replaces the cache.
    async fn list(&self, limit: u32, offset: u32, filter: RoutineFilter) -> Result<Page<Routine>>;

    async fn update(&self, routine_id: &str, update: RoutineUpdate) -> Result<Routine>;

    async fn delete(&self, routine_id: &str) -> Result<()>;

    async fn details(&self, routine_id: &str) -> Result<Routine>;
}
