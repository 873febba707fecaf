use chrono::{DateTime, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use super::account_forms::noop;
use super::form_field::{validate_all, FormFieldState, OnChange};
use crate::errors::Result;
use crate::patch::Patch;
use crate::routines::{Routine, RoutineCreate, RoutineType, RoutineUpdate};
use crate::utils::time_utils::local_datetime_to_utc;
use crate::validation::{NoOpValidator, NotEmptyCollectionValidator};

/// Add/edit form for a routine. Date and time are device-local.
pub struct RoutineForm {
    pub date: FormFieldState<NaiveDate>,
    pub time: FormFieldState<NaiveTime>,
    pub routine_type: FormFieldState<RoutineType>,
    pub product_ids: FormFieldState<Vec<String>>,
    pub notes: FormFieldState<String>,
    tz: Tz,
}

impl RoutineForm {
    /// Starts at `now` with the type suggested for that time of day.
    pub fn new(now: DateTime<Tz>, on_change: OnChange) -> Self {
        let time = now.time();
        Self {
            date: FormFieldState::new(now.date_naive(), NoOpValidator)
                .with_on_change(on_change.clone()),
            time: FormFieldState::new(time, NoOpValidator).with_on_change(on_change.clone()),
            routine_type: FormFieldState::new(RoutineType::suggested_for(time), NoOpValidator)
                .with_on_change(on_change.clone()),
            product_ids: FormFieldState::new(
                Vec::new(),
                NotEmptyCollectionValidator::new("Select at least one product"),
            )
            .with_on_change(on_change.clone()),
            notes: FormFieldState::new(String::new(), NoOpValidator).with_on_change(on_change),
            tz: now.timezone(),
        }
    }

    pub fn at(now: DateTime<Tz>) -> Self {
        Self::new(now, noop())
    }

    pub fn fill(&mut self, routine: &Routine) {
        let local = routine.performed_at.with_timezone(&self.tz);
        self.date.set_value(local.date_naive());
        self.time.set_value(local.time());
        self.routine_type.set_value(routine.routine_type);
        self.product_ids.set_value(routine.product_ids());
        self.notes.set_value(routine.notes.clone().unwrap_or_default());
    }

    /// Adds the product if absent, removes it otherwise.
    pub fn toggle_product(&mut self, product_id: &str) {
        let mut ids = self.product_ids.value();
        match ids.iter().position(|id| id == product_id) {
            Some(index) => {
                ids.remove(index);
            }
            None => ids.push(product_id.to_string()),
        }
        self.product_ids.on_value_change(ids);
    }

    pub fn validate_all(&mut self) -> bool {
        validate_all(&mut [
            &mut self.date,
            &mut self.time,
            &mut self.routine_type,
            &mut self.product_ids,
            &mut self.notes,
        ])
    }

    pub fn to_create(&self) -> Result<RoutineCreate> {
        Ok(RoutineCreate {
            routine_type: Some(self.routine_type.value()),
            notes: self.notes_value(),
            performed_at: local_datetime_to_utc(self.date.value(), self.time.value(), self.tz)?,
            product_ids: self.product_ids.value(),
        })
    }

    pub fn to_update(&self) -> Result<RoutineUpdate> {
        Ok(RoutineUpdate {
            routine_type: Patch::Set(self.routine_type.value()),
            notes: self.notes_value().into(),
            performed_at: Patch::Set(local_datetime_to_utc(
                self.date.value(),
                self.time.value(),
                self.tz,
            )?),
            product_ids: Patch::Set(self.product_ids.value()),
        })
    }

    fn notes_value(&self) -> Option<String> {
        let notes = self.notes.value();
        let trimmed = notes.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}
