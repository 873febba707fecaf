use anyhow::anyhow;
use chrono::{NaiveTime, Timelike, Utc};
use serde_json::json;
use skincare_core::forms::NotificationRuleForm;
use skincare_core::notifications::{NotificationRuleRepositoryTrait, NotificationRuleUpdate};
use skincare_core::state::ui_error_message;
use skincare_core::Patch;

use super::{ensure_valid, print_json, require_session, submit};
use crate::cli::{RuleCommand, RuleFields};
use crate::main_lib::AppContext;

pub async fn run(ctx: &AppContext, command: RuleCommand) -> anyhow::Result<()> {
    require_session(ctx)?;
    match command {
        RuleCommand::List => print_json(&submit(ctx.rules.list()).await?),
        RuleCommand::Show { id } => print_json(&submit(ctx.rules.details(&id)).await?),
        RuleCommand::Add(fields) => {
            if fields.time.is_none() {
                return Err(anyhow!("--time is required"));
            }
            let mut form = NotificationRuleForm::at(default_time(ctx));
            apply(&mut form, fields);
            validate(&mut form)?;
            let rule = form.to_create().map_err(|e| anyhow!(ui_error_message(&e)))?;
            print_json(&submit(ctx.rules.add(rule)).await?)
        }
        RuleCommand::Update {
            id,
            fields,
            enable,
            disable,
        } => {
            let current = submit(ctx.rules.details(&id)).await?;
            let mut form = NotificationRuleForm::at(current.time_of_day);
            form.fill(&current);

            let mut update = if apply(&mut form, fields) {
                validate(&mut form)?;
                form.to_update().map_err(|e| anyhow!(ui_error_message(&e)))?
            } else {
                NotificationRuleUpdate::default()
            };
            if enable || disable {
                update.enabled = Patch::Set(enable);
            }
            if update.is_empty() {
                return Err(anyhow!("Nothing to update"));
            }
            print_json(&submit(ctx.rules.update(&id, update)).await?)
        }
        RuleCommand::Delete { id } => {
            submit(ctx.rules.delete(&id)).await?;
            print_json(&json!({ "deleted": id }))
        }
        RuleCommand::Next { last_run } => {
            let tz = ctx.config.timezone;
            let now = Utc::now().with_timezone(&tz);
            let last_run = last_run.map(|at| at.with_timezone(&tz));
            let rules = submit(ctx.rules.list()).await?;
            let planned: Vec<_> = rules
                .iter()
                .map(|rule| {
                    json!({
                        "id": rule.id,
                        "frequency": rule.frequency(),
                        "enabled": rule.enabled,
                        "nextAt": rule.next_occurrence(last_run, now).map(|at| at.to_rfc3339()),
                    })
                })
                .collect();
            print_json(&planned)
        }
    }
}

/// Current local time rounded down to the minute.
fn default_time(ctx: &AppContext) -> NaiveTime {
    let now = Utc::now().with_timezone(&ctx.config.timezone).time();
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

/// Copies the given flags into the form. Returns whether any schedule field
/// was set.
fn apply(form: &mut NotificationRuleForm, fields: RuleFields) -> bool {
    let mut touched = false;
    if let Some(time) = fields.time {
        form.time.on_value_change(time);
        touched = true;
    }
    if let Some(frequency) = fields.frequency {
        form.frequency.on_value_change(frequency);
        touched = true;
    }
    if let Some(every_n) = fields.every_n {
        form.every_n.on_value_change(every_n);
        touched = true;
    }
    if let Some(weekdays) = fields.weekdays {
        form.weekdays.on_value_change(weekdays);
        touched = true;
    }
    touched
}

fn validate(form: &mut NotificationRuleForm) -> anyhow::Result<()> {
    let valid = form.validate_all();
    ensure_valid(
        valid,
        &[
            ("every_n", form.every_n.error()),
            ("weekdays", form.weekdays.error()),
        ],
    )
}
