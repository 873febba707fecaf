use serde_json::json;
use skincare_core::forms::ProductForm;
use skincare_core::products::ProductRepositoryTrait;

use super::{ensure_valid, load_pages, print_json, require_session, submit};
use crate::cli::{ProductCommand, ProductFields};
use crate::main_lib::AppContext;

pub async fn run(ctx: &AppContext, command: ProductCommand) -> anyhow::Result<()> {
    require_session(ctx)?;
    match command {
        ProductCommand::List(page) => {
            let limit = page.limit.unwrap_or(ctx.config.page_size);
            let products = load_pages(page.offset, page.all, |offset| {
                ctx.products.list(limit, offset)
            })
            .await?;
            print_json(&products)
        }
        ProductCommand::Show { id } => print_json(&submit(ctx.products.details(&id)).await?),
        ProductCommand::Add(fields) => {
            let mut form = ProductForm::default();
            apply(&mut form, fields);
            validate(&mut form)?;
            let product = submit(ctx.products.add(form.to_create())).await?;
            print_json(&product)
        }
        ProductCommand::Update { id, fields } => {
            let current = submit(ctx.products.details(&id)).await?;
            let mut form = ProductForm::default();
            form.fill(&current);
            apply(&mut form, fields);
            validate(&mut form)?;
            let product = submit(ctx.products.update(&id, form.to_update())).await?;
            print_json(&product)
        }
        ProductCommand::Delete { id } => {
            submit(ctx.products.delete(&id)).await?;
            print_json(&json!({ "deleted": id }))
        }
    }
}

fn apply(form: &mut ProductForm, fields: ProductFields) {
    if let Some(name) = fields.name {
        form.name.on_value_change(name);
    }
    if let Some(brand) = fields.brand {
        form.brand.on_value_change(brand);
    }
    if let Some(purpose) = fields.purpose {
        form.purpose.on_value_change(purpose);
    }
    if let Some(description) = fields.description {
        form.description.on_value_change(description);
    }
}

fn validate(form: &mut ProductForm) -> anyhow::Result<()> {
    let valid = form.validate_all();
    ensure_valid(valid, &[("name", form.name.error())])
}
