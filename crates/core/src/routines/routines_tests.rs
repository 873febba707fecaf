#[cfg(test)]
mod tests {
    use crate::errors::{Error, Result};
    use crate::pagination::Page;
    use crate::patch::Patch;
    use crate::products::Product;
    use crate::routines::*;
    use async_trait::async_trait;
    use chrono::{DateTime, NaiveTime, TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MockRoutineRemote {
        routines: Mutex<Vec<Routine>>,
        filters: Mutex<Vec<RoutineFilter>>,
    }

    #[async_trait]
    impl RoutineRemoteTrait for MockRoutineRemote {
        async fn add_routine(&self, routine: &RoutineCreate) -> Result<Routine> {
            Ok(Routine {
                id: format!("r{}", self.routines.lock().unwrap().len() + 1),
                routine_type: routine.routine_type.unwrap_or(RoutineType::Daily),
                notes: routine.notes.clone(),
                performed_at: routine.performed_at,
                products: routine.product_ids.iter().map(|id| product(id)).collect(),
            })
        }

        async fn list_routines(
            &self,
            limit: u32,
            offset: u32,
            filter: &RoutineFilter,
        ) -> Result<Page<Routine>> {
            self.filters.lock().unwrap().push(*filter);
            let all = self.routines.lock().unwrap();
            let items: Vec<Routine> = all
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect();
            Ok(Page::new(items, offset, limit, all.len() as u32))
        }

        async fn get_routine(&self, routine_id: &str) -> Result<Routine> {
            self.routines
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == routine_id)
                .cloned()
                .ok_or_else(|| Error::NotFound(routine_id.to_string()))
        }

        async fn update_routine(
            &self,
            routine_id: &str,
            update: &RoutineUpdate,
        ) -> Result<Routine> {
            let mut routine = self.get_routine(routine_id).await?;
            routine.notes = update.notes.clone().apply_to(routine.notes);
            if let Some(kind) = update.routine_type.as_set() {
                routine.routine_type = *kind;
            }
            Ok(routine)
        }

        async fn delete_routine(&self, routine_id: &str) -> Result<()> {
            self.routines.lock().unwrap().retain(|r| r.id != routine_id);
            Ok(())
        }
    }

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_uppercase(),
            brand: None,
            purpose: None,
            description: None,
        }
    }

    fn instant(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
    }

    fn routine(id: &str, day: u32) -> Routine {
        Routine {
            id: id.to_string(),
            routine_type: RoutineType::Morning,
            notes: Some("gentle".to_string()),
            performed_at: instant(day, 7),
            products: vec![product("p1")],
        }
    }

    fn seeded(routines: Vec<Routine>) -> (Arc<MockRoutineRemote>, RoutineRepository) {
        let remote = Arc::new(MockRoutineRemote::default());
        *remote.routines.lock().unwrap() = routines;
        let repo = RoutineRepository::new(remote.clone());
        (remote, repo)
    }

    #[test]
    fn test_routine_type_tags() {
        assert_eq!(RoutineType::Night.as_str(), "NIGHT");
        assert_eq!("morning".parse::<RoutineType>().unwrap(), RoutineType::Morning);
        assert!(serde_json::from_str::<RoutineType>("\"EVENING\"").is_err());
        assert_eq!(
            serde_json::to_string(&RoutineType::Other).unwrap(),
            "\"OTHER\""
        );
    }

    #[test]
    fn test_every_routine_type_tag_parses_back() {
        for kind in RoutineType::ALL {
            assert_eq!(RoutineType::from_tag(kind.as_str()), Some(kind));
        }
        let err = serde_json::from_str::<RoutineType>("\"EVENING\"").unwrap_err();
        assert!(err.to_string().contains("MORNING"));
        assert!(err.to_string().contains("OTHER"));
    }

    #[test]
    fn test_suggested_type_by_hour() {
        let at = |h| NaiveTime::from_hms_opt(h, 30, 0).unwrap();
        assert_eq!(RoutineType::suggested_for(at(5)), RoutineType::Morning);
        assert_eq!(RoutineType::suggested_for(at(11)), RoutineType::Morning);
        assert_eq!(RoutineType::suggested_for(at(12)), RoutineType::Daily);
        assert_eq!(RoutineType::suggested_for(at(18)), RoutineType::Night);
        assert_eq!(RoutineType::suggested_for(at(2)), RoutineType::Daily);
    }

    #[test]
    fn test_create_and_update_validation() {
        let create = RoutineCreate::new(instant(1, 7), vec![]);
        assert!(create.validate().is_err());

        let update = RoutineUpdate {
            product_ids: Patch::Set(vec![]),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = RoutineUpdate {
            performed_at: Patch::Clear,
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = RoutineUpdate {
            notes: Patch::Clear,
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_filter_rejects_inverted_window() {
        let filter = RoutineFilter {
            performed_after: Some(instant(3, 0)),
            performed_before: Some(instant(1, 0)),
        };
        assert!(filter.validate().is_err());
        assert!(RoutineFilter::default().validate().is_ok());
    }

    #[tokio::test]
    async fn test_list_passes_filter_and_pages() {
        let (remote, repo) = seeded(vec![routine("a", 1), routine("b", 2), routine("c", 3)]);
        let filter = RoutineFilter {
            performed_after: Some(instant(1, 0)),
            performed_before: None,
        };

        let page = repo.list(2, 0, filter).await.unwrap();
        assert!(page.has_more);
        repo.list(2, 2, filter).await.unwrap();

        let ids: Vec<String> = repo.routines().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(remote.filters.lock().unwrap()[0], filter);
    }

    #[tokio::test]
    async fn test_invalid_filter_never_calls_remote() {
        let (remote, repo) = seeded(vec![routine("a", 1)]);
        let filter = RoutineFilter {
            performed_after: Some(instant(3, 0)),
            performed_before: Some(instant(1, 0)),
        };
        assert!(repo.list(15, 0, filter).await.is_err());
        assert!(remote.filters.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_update_delete_keep_cache_in_sync() {
        let (_, repo) = seeded(vec![routine("r1", 1)]);
        repo.list(15, 0, RoutineFilter::default()).await.unwrap();

        let mut create =
            RoutineCreate::new(instant(4, 21), vec!["p1".to_string(), "p2".to_string()]);
        create.routine_type = Some(RoutineType::Night);
        let created = repo.add(create).await.unwrap();
        assert_eq!(created.product_ids(), vec!["p1", "p2"]);
        assert_eq!(repo.routines()[0].id, created.id);

        let update = RoutineUpdate {
            notes: Patch::Clear,
            routine_type: Patch::Set(RoutineType::Other),
            ..Default::default()
        };
        let updated = repo.update("r1", update).await.unwrap();
        assert_eq!(updated.notes, None);
        assert_eq!(repo.routines()[1].routine_type, RoutineType::Other);

        repo.delete("r1").await.unwrap();
        assert_eq!(repo.routines().len(), 1);
    }
}
