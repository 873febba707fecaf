use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::watch;

use super::routines_model::{Routine, RoutineCreate, RoutineFilter, RoutineUpdate};
use super::routines_traits::{RoutineRemoteTrait, RoutineRepositoryTrait};
use crate::cache::{apply_page, CachedList, Cleanable, Identifiable};
use crate::errors::Result;
use crate::pagination::Page;

impl Identifiable for Routine {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Repository for logged routines, mirroring the pages fetched so far.
pub struct RoutineRepository {
    remote: Arc<dyn RoutineRemoteTrait>,
    cache: CachedList<Routine>,
}

impl RoutineRepository {
    pub fn new(remote: Arc<dyn RoutineRemoteTrait>) -> Self {
        Self {
            remote,
            cache: CachedList::new(),
        }
    }
}

impl Cleanable for RoutineRepository {
    fn clear(&self) {
        self.cache.clear();
    }
}

#[async_trait]
impl RoutineRepositoryTrait for RoutineRepository {
    fn routines(&self) -> Vec<Routine> {
        self.cache.snapshot()
    }

    fn subscribe(&self) -> watch::Receiver<Vec<Routine>> {
        self.cache.subscribe()
    }

    async fn add(&self, routine: RoutineCreate) -> Result<Routine> {
        routine.validate()?;
        let created = self
            .remote
            .add_routine(&routine)
            .await
            .inspect_err(|e| warn!("Failed to log routine: {}", e))?;
        debug!("Logged {} routine {}", created.routine_type, created.id);
        self.cache.prepend(created.clone());
        Ok(created)
    }

    async fn list(&self, limit: u32, offset: u32, filter: RoutineFilter) -> Result<Page<Routine>> {
        filter.validate()?;
        let page = self.remote.list_routines(limit, offset, &filter).await?;
        debug!("Fetched {} routines at offset {}", page.items.len(), offset);
        apply_page(&self.cache, offset, page.items.clone());
        Ok(page)
    }

    async fn update(&self, routine_id: &str, update: RoutineUpdate) -> Result<Routine> {
        update.validate()?;
        let updated = self
            .remote
            .update_routine(routine_id, &update)
            .await
            .inspect_err(|e| warn!("Failed to update routine {}: {}", routine_id, e))?;
        self.cache.replace(updated.clone());
        Ok(updated)
    }

    async fn delete(&self, routine_id: &str) -> Result<()> {
        self.remote
            .delete_routine(routine_id)
            .await
            .inspect_err(|e| warn!("Failed to delete routine {}: {}", routine_id, e))?;
        self.cache.remove(routine_id);
        Ok(())
    }

    async fn details(&self, routine_id: &str) -> Result<Routine> {
        let routine = self.remote.get_routine(routine_id).await?;
        self.cache.replace(routine.clone());
        Ok(routine)
    }
}
