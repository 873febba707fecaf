mod account;
mod products;
mod routines;
mod rules;

use anyhow::{anyhow, bail};
use serde::Serialize;
use skincare_core::cache::Identifiable;
use skincare_core::state::{run_action, run_page_load, FormScreen, PagedListScreen, StateHolder};
use skincare_core::Page;
use std::future::Future;

use crate::cli::Command;
use crate::main_lib::AppContext;

pub async fn run(command: Command, ctx: &AppContext) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => account::login(ctx, email, password).await,
        Command::Logout => account::logout(ctx),
        Command::Register(args) => account::register(ctx, args).await,
        Command::Me => account::me(ctx).await,
        Command::ProfileUpdate {
            email,
            name,
            surname,
        } => account::profile_update(ctx, email, name, surname).await,
        Command::Products(command) => products::run(ctx, command).await,
        Command::Routines(command) => routines::run(ctx, command).await,
        Command::Rules(command) => rules::run(ctx, command).await,
        Command::Device(command) => account::device(ctx, command).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn require_session(ctx: &AppContext) -> anyhow::Result<()> {
    if !ctx.session.is_logged_in() {
        bail!("Not logged in. Run `skincare login` first.");
    }
    Ok(())
}

/// Fails with every field error when the form did not validate.
fn ensure_valid(valid: bool, fields: &[(&str, Option<&str>)]) -> anyhow::Result<()> {
    if valid {
        return Ok(());
    }
    let problems: Vec<String> = fields
        .iter()
        .filter_map(|(field, error)| error.map(|message| format!("{}: {}", field, message)))
        .collect();
    bail!("{}", problems.join("; "))
}

/// Runs an operation through a form screen so the failure surfaces as the
/// message the screen would show.
async fn submit<T, F>(operation: F) -> anyhow::Result<T>
where
    F: Future<Output = skincare_core::Result<T>>,
{
    let screen = StateHolder::<FormScreen>::default();
    match run_action(&screen, operation).await {
        Some(value) => Ok(value),
        None => Err(anyhow!(screen
            .snapshot()
            .error
            .unwrap_or_else(|| "An unexpected error occurred".to_string()))),
    }
}

/// Loads one page, or every page from `offset` on when `all` is set.
async fn load_pages<T, F, Fut>(offset: u32, all: bool, load: F) -> anyhow::Result<Page<T>>
where
    T: Identifiable + Clone + PartialEq + Send + Sync + 'static,
    F: Fn(u32) -> Fut,
    Fut: Future<Output = skincare_core::Result<Page<T>>>,
{
    let screen = StateHolder::<PagedListScreen<T>>::default();
    let mut next = offset;
    loop {
        run_page_load(&screen, next, load(next)).await;
        let state = screen.snapshot();
        if let Some(error) = state.error {
            bail!(error);
        }
        if !all || !state.has_more || state.next_offset == next {
            return Ok(Page {
                items: state.items,
                has_more: state.has_more,
            });
        }
        next = state.next_offset;
    }
}
