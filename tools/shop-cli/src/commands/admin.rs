//! Admin product management.

use anyhow::{anyhow, Result};
use dialoguer::{Confirm, Input};
use serde_json::json;
use shop_app::admin::{AdminConsole, ProductForm};
use shop_commerce::ProductId;

use super::{AdminArgs, AdminCommand, ProductFields};
use crate::context::Context;
use crate::output::{stock_badge, truncate};

/// Run the admin command.
pub fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    let app = ctx.storefront()?;
    let mut console = app.admin()?;
    load(&mut console, ctx)?;

    match args.command {
        Some(AdminCommand::List) | None => {}
        Some(AdminCommand::Create(fields)) => {
            let form = fields.into_form(ProductForm::default(), !ctx.output.is_json())?;
            console.create(&form)?;
            ctx.output.success(&format!("Created {}", form.name.trim()));
        }
        Some(AdminCommand::Update { id, fields }) => {
            let id = ProductId::new(id);
            let current = console
                .find(&id)
                .ok_or_else(|| anyhow!("Product not found: {}", id))?;
            let form = fields.into_form(ProductForm::from_product(current), false)?;
            console.update(&id, &form)?;
            ctx.output.success(&format!("Updated {}", id));
        }
        Some(AdminCommand::Delete { id, yes }) => {
            let id = ProductId::new(id);
            let product = console
                .find(&id)
                .cloned()
                .ok_or_else(|| anyhow!("Product not found: {}", id))?;

            let mut prompt_error = None;
            let deleted = console.delete(&product, |question| {
                if yes {
                    return true;
                }
                match Confirm::new().with_prompt(question).default(false).interact() {
                    Ok(answer) => answer,
                    Err(e) => {
                        prompt_error = Some(e);
                        false
                    }
                }
            })?;
            if let Some(e) = prompt_error {
                return Err(e.into());
            }

            if deleted {
                ctx.output.success(&format!("Deleted {}", product.name));
            } else {
                ctx.output.info("Delete cancelled");
            }
        }
    }

    list(&console, ctx);
    Ok(())
}

fn load(console: &mut AdminConsole, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading products...");
    let result = console.refresh().map(|_| ());
    spinner.finish_and_clear();
    Ok(result?)
}

fn list(console: &AdminConsole, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&json!({ "products": console.products() }));
        return;
    }

    ctx.output.header("Products");
    if console.products().is_empty() {
        ctx.output.info("No products yet. Run `shop admin create` to add one.");
        return;
    }
    ctx.output.table_row(&["ID", "NAME", "CATEGORY", "PRICE", "STOCK"], &[26, 28, 14, 10, 5]);
    for product in console.products() {
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &truncate(&product.name, 28),
                &truncate(&product.category, 14),
                &product.display_price().display(),
                &stock_badge(product.stock),
            ],
            &[26, 28, 14, 10, 5],
        );
    }
}

impl ProductFields {
    /// Overlay the given flags on `base`, prompting for blanks if asked to.
    fn into_form(self, base: ProductForm, interactive: bool) -> Result<ProductForm> {
        let pick = |flag: Option<String>, current: String, label: &str| -> Result<String> {
            match flag {
                Some(value) => Ok(value),
                None if interactive && current.trim().is_empty() => Ok(Input::<String>::new()
                    .with_prompt(label)
                    .allow_empty(true)
                    .interact_text()?),
                None => Ok(current),
            }
        };

        Ok(ProductForm {
            name: pick(self.name, base.name, "Name")?,
            description: pick(self.description, base.description, "Description")?,
            price: pick(self.price, base.price, "Price")?,
            category: pick(self.category, base.category, "Category")?,
            stock: pick(self.stock, base.stock, "Stock")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_keeps_unset_fields() {
        let base = ProductForm {
            name: "Honey".to_string(),
            description: "Raw".to_string(),
            price: "12.50".to_string(),
            category: "Pantry".to_string(),
            stock: "7".to_string(),
        };
        let fields = ProductFields {
            price: Some("9.99".to_string()),
            ..Default::default()
        };

        let form = fields.into_form(base, false).unwrap();
        assert_eq!(form.name, "Honey");
        assert_eq!(form.price, "9.99");
        assert_eq!(form.stock, "7");
    }
}
