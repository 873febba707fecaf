//! Glue between async repository calls and screen state.

use log::debug;
use std::future::Future;
use std::sync::Arc;

use super::screens::{FormEvent, FormScreen, PagedListEvent, PagedListScreen};
use super::state_holder::StateHolder;
use crate::cache::Identifiable;
use crate::errors::{Error, RemoteError, Result};
use crate::forms::OnChange;
use crate::pagination::Page;

const NETWORK_ERROR_MESSAGE: &str = "Network error occurred";
const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Message shown to the user for a failed operation.
pub fn ui_error_message(error: &Error) -> String {
    match error {
        Error::Remote(RemoteError::Api { problem, .. }) => problem.display_message().to_string(),
        Error::Remote(RemoteError::Network(_)) => NETWORK_ERROR_MESSAGE.to_string(),
        Error::Validation(validation) => validation.message(),
        _ => UNEXPECTED_ERROR_MESSAGE.to_string(),
    }
}

/// Runs a submit action against a form screen. Returns the value on success.
pub async fn run_action<T, F>(holder: &StateHolder<FormScreen>, action: F) -> Option<T>
where
    F: Future<Output = Result<T>>,
{
    holder.dispatch(FormEvent::Submitted);
    match action.await {
        Ok(value) => {
            holder.dispatch(FormEvent::Succeeded);
            Some(value)
        }
        Err(err) => {
            debug!("Form action failed: {}", err);
            holder.dispatch(FormEvent::Failed(ui_error_message(&err)));
            None
        }
    }
}

/// Loads one page into a list screen.
pub async fn run_page_load<T, F>(holder: &StateHolder<PagedListScreen<T>>, offset: u32, load: F)
where
    T: Identifiable + Clone + PartialEq + Send + Sync + 'static,
    F: Future<Output = Result<Page<T>>>,
{
    holder.dispatch(PagedListEvent::LoadStarted);
    match load.await {
        Ok(page) => holder.dispatch(PagedListEvent::PageLoaded { offset, page }),
        Err(err) => {
            debug!("Page load at offset {} failed: {}", offset, err);
            holder.dispatch(PagedListEvent::LoadFailed(ui_error_message(&err)));
        }
    }
}

/// Field callback that drops the form screen's error banner on edit.
pub fn error_dismisser(holder: Arc<StateHolder<FormScreen>>) -> OnChange {
    Arc::new(move || holder.dispatch(FormEvent::FieldEdited))
}
