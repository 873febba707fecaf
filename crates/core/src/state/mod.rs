//! State module - reducers and state holders for screens.

mod actions;
mod screens;
mod state_holder;


pub use actions::{error_dismisser, run_action, run_page_load, ui_error_message};
pub use screens::{
    FormEvent, FormScreen, FormScreenState, PagedListEvent, PagedListScreen, PagedListState,
};
pub use state_holder::{Reducer, StateHolder};
