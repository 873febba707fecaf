use serde_json::json;
use skincare_core::auth::AuthRepositoryTrait;
use skincare_core::devices::DeviceTokenRepositoryTrait;
use skincare_core::forms::{LoginForm, ProfileForm, RegisterForm};
use skincare_core::state::ui_error_message;
use skincare_core::users::UserRepositoryTrait;

use super::{ensure_valid, print_json, require_session, submit};
use crate::cli::{DeviceCommand, RegisterArgs};
use crate::main_lib::AppContext;

pub async fn login(ctx: &AppContext, email: String, password: String) -> anyhow::Result<()> {
    let mut form = LoginForm::default();
    form.email.on_value_change(email);
    form.password.on_value_change(password);
    let valid = form.validate_all();
    ensure_valid(
        valid,
        &[("email", form.email.error()), ("password", form.password.error())],
    )?;

    let email = form.email.value();
    submit(ctx.session.auth().login(&email, &form.password.value())).await?;
    tracing::info!("Signed in as {}", email.trim());
    print_json(&json!({ "loggedIn": true, "email": email.trim() }))
}

pub fn logout(ctx: &AppContext) -> anyhow::Result<()> {
    ctx.session
        .logout()
        .map_err(|e| anyhow::anyhow!(ui_error_message(&e)))?;
    print_json(&json!({ "loggedIn": false }))
}

pub async fn register(ctx: &AppContext, args: RegisterArgs) -> anyhow::Result<()> {
    let mut form = RegisterForm::default();
    form.email.on_value_change(args.email);
    form.name.on_value_change(args.name);
    form.surname.on_value_change(args.surname);
    form.username.on_value_change(args.username);
    form.password.on_value_change(args.password);
    form.confirm_password.on_value_change(args.confirm_password);

    let valid = form.validate_all();
    ensure_valid(
        valid,
        &[
            ("email", form.email.error()),
            ("name", form.name.error()),
            ("surname", form.surname.error()),
            ("username", form.username.error()),
            ("password", form.password.error()),
            ("confirm_password", form.confirm_password.error()),
        ],
    )?;

    let user = submit(ctx.users.register(form.to_registration())).await?;
    print_json(&user)
}

pub async fn me(ctx: &AppContext) -> anyhow::Result<()> {
    require_session(ctx)?;
    let user = submit(ctx.users.profile()).await?;
    print_json(&user)
}

pub async fn profile_update(
    ctx: &AppContext,
    email: Option<String>,
    name: Option<String>,
    surname: Option<String>,
) -> anyhow::Result<()> {
    require_session(ctx)?;
    let current = submit(ctx.users.profile()).await?;

    let mut form = ProfileForm::default();
    form.fill(&current);
    if let Some(email) = email {
        form.email.on_value_change(email);
    }
    if let Some(name) = name {
        form.name.on_value_change(name);
    }
    if let Some(surname) = surname {
        form.surname.on_value_change(surname);
    }

    let valid = form.validate_all();
    ensure_valid(
        valid,
        &[
            ("email", form.email.error()),
            ("name", form.name.error()),
            ("surname", form.surname.error()),
        ],
    )?;

    let user = submit(ctx.users.update(form.to_update())).await?;
    print_json(&user)
}

pub async fn device(ctx: &AppContext, command: DeviceCommand) -> anyhow::Result<()> {
    require_session(ctx)?;
    match command {
        DeviceCommand::Register { token } => {
            submit(ctx.devices.save_current_token(&token)).await?;
            print_json(&json!({ "registered": true }))
        }
    }
}
