use anyhow::anyhow;
use chrono::Utc;
use serde_json::json;
use skincare_core::forms::RoutineForm;
use skincare_core::routines::{RoutineFilter, RoutineRepositoryTrait, RoutineType};
use skincare_core::state::ui_error_message;

use super::{ensure_valid, load_pages, print_json, require_session, submit};
use crate::cli::{RoutineCommand, RoutineFields};
use crate::main_lib::AppContext;

pub async fn run(ctx: &AppContext, command: RoutineCommand) -> anyhow::Result<()> {
    require_session(ctx)?;
    match command {
        RoutineCommand::List {
            page,
            after,
            before,
        } => {
            let filter = RoutineFilter {
                performed_after: after,
                performed_before: before,
            };
            let limit = page.limit.unwrap_or(ctx.config.page_size);
            let routines = load_pages(page.offset, page.all, |offset| {
                ctx.routines.list(limit, offset, filter)
            })
            .await?;
            print_json(&routines)
        }
        RoutineCommand::Show { id } => print_json(&submit(ctx.routines.details(&id)).await?),
        RoutineCommand::Add(fields) => {
            let mut form = new_form(ctx);
            apply(&mut form, fields, true);
            validate(&mut form)?;
            let routine = form.to_create().map_err(|e| anyhow!(ui_error_message(&e)))?;
            print_json(&submit(ctx.routines.add(routine)).await?)
        }
        RoutineCommand::Update { id, fields } => {
            let current = submit(ctx.routines.details(&id)).await?;
            let mut form = new_form(ctx);
            form.fill(&current);
            apply(&mut form, fields, false);
            validate(&mut form)?;
            let update = form.to_update().map_err(|e| anyhow!(ui_error_message(&e)))?;
            print_json(&submit(ctx.routines.update(&id, update)).await?)
        }
        RoutineCommand::Delete { id } => {
            submit(ctx.routines.delete(&id)).await?;
            print_json(&json!({ "deleted": id }))
        }
    }
}

fn new_form(ctx: &AppContext) -> RoutineForm {
    RoutineForm::at(Utc::now().with_timezone(&ctx.config.timezone))
}

/// On add, products are toggled in; on update, a non-empty list replaces
/// the current selection.
fn apply(form: &mut RoutineForm, fields: RoutineFields, adding: bool) {
    if let Some(date) = fields.date {
        form.date.on_value_change(date);
    }
    if let Some(time) = fields.time {
        form.time.on_value_change(time);
        if adding && fields.routine_type.is_none() {
            form.routine_type.on_value_change(RoutineType::suggested_for(time));
        }
    }
    if let Some(routine_type) = fields.routine_type {
        form.routine_type.on_value_change(routine_type);
    }
    if let Some(notes) = fields.notes {
        form.notes.on_value_change(notes);
    }
    if adding {
        for product_id in &fields.products {
            form.toggle_product(product_id);
        }
    } else if !fields.products.is_empty() {
        form.product_ids.on_value_change(fields.products);
    }
}

fn validate(form: &mut RoutineForm) -> anyhow::Result<()> {
    let valid = form.validate_all();
    ensure_valid(valid, &[("product_ids", form.product_ids.error())])
}
