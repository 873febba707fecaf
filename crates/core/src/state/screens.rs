//! State machines of the form and list screens.

use std::collections::HashSet;
use std::marker::PhantomData;

use super::state_holder::Reducer;
use crate::cache::Identifiable;
use crate::pagination::Page;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormScreenState {
    pub is_loading: bool,
    pub is_successful: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Submitted,
    Succeeded,
    Failed(String),
    FieldEdited,
    ErrorDismissed,
}

/// Add/edit screens: submit, then success or a dismissible error banner.
pub struct FormScreen;

impl Reducer for FormScreen {
    type State = FormScreenState;
    type Event = FormEvent;

    fn reduce(state: &FormScreenState, event: FormEvent) -> FormScreenState {
        match event {
            FormEvent::Submitted => FormScreenState {
                is_loading: true,
                is_successful: false,
                error: None,
            },
            FormEvent::Succeeded => FormScreenState {
                is_loading: false,
                is_successful: true,
                error: None,
            },
            FormEvent::Failed(message) => FormScreenState {
                is_loading: false,
                is_successful: false,
                error: Some(message),
            },
            FormEvent::FieldEdited | FormEvent::ErrorDismissed => FormScreenState {
                error: None,
                ..state.clone()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedListState<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
    pub has_more: bool,
    /// Offset of the next page to request.
    pub next_offset: u32,
    pub error: Option<String>,
}

impl<T> Default for PagedListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            has_more: true,
            next_offset: 0,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagedListEvent<T> {
    LoadStarted,
    PageLoaded { offset: u32, page: Page<T> },
    LoadFailed(String),
    ErrorDismissed,
}

/// Infinite-scroll list screens. Offset 0 refreshes, later pages append
/// without duplicating ids.
pub struct PagedListScreen<T>(PhantomData<fn() -> T>);

impl<T> Reducer for PagedListScreen<T>
where
    T: Identifiable + Clone + PartialEq + Send + Sync + 'static,
{
    type State = PagedListState<T>;
    type Event = PagedListEvent<T>;

    fn reduce(state: &PagedListState<T>, event: PagedListEvent<T>) -> PagedListState<T> {
        match event {
            PagedListEvent::LoadStarted => PagedListState {
                is_loading: true,
                error: None,
                ..state.clone()
            },
            PagedListEvent::PageLoaded { offset, page } => {
                let fetched = page.items.len() as u32;
                let items = if offset == 0 {
                    page.items
                } else {
                    let mut items = state.items.clone();
                    items.extend(page.items);
                    let mut seen = HashSet::new();
                    items.retain(|item| seen.insert(item.id().to_string()));
                    items
                };
                PagedListState {
                    items,
                    is_loading: false,
                    has_more: page.has_more,
                    next_offset: offset.saturating_add(fetched),
                    error: None,
                }
            }
            PagedListEvent::LoadFailed(message) => PagedListState {
                is_loading: false,
                error: Some(message),
                ..state.clone()
            },
            PagedListEvent::ErrorDismissed => PagedListState {
                error: None,
                ..state.clone()
            },
        }
    }
}
