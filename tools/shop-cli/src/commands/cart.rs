//! Cart commands.

use anyhow::{anyhow, Result};
use serde_json::json;
use shop_app::cart_store::CartStore;
use shop_app::Storefront;
use shop_commerce::ProductId;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut app = ctx.storefront()?;
    match args.command {
        Some(CartCommand::Show) | None => {}
        Some(CartCommand::Add { id }) => add(&mut app, &ProductId::new(id), ctx)?,
        Some(CartCommand::Remove { id }) => {
            let id = ProductId::new(id);
            if app.cart_mut().remove(&id)? {
                ctx.output.success(&format!("Removed {} from the cart", id));
            } else {
                ctx.output.warn(&format!("{} is not in the cart", id));
            }
        }
        Some(CartCommand::Set { id, quantity }) => {
            let id = ProductId::new(id);
            let quantity = set_line(app.cart_mut(), &id, quantity)?;
            ctx.output.success(&format!("Quantity of {} set to {}", id, quantity));
        }
        Some(CartCommand::Clear) => {
            app.cart_mut().clear()?;
            ctx.output.success("Cart cleared");
        }
    }
    show(app.cart(), ctx)
}

/// Add one unit of a listed product.
fn add(app: &mut Storefront, id: &ProductId, ctx: &Context) -> Result<()> {
    let mut catalog = app.catalog();
    let spinner = ctx.output.spinner("Looking up product...");
    let refreshed = catalog.refresh().map(|_| ());
    spinner.finish_and_clear();
    refreshed?;

    let product = catalog
        .find(id)
        .cloned()
        .ok_or_else(|| anyhow!("Product not found: {}", id))?;
    let quantity = app.cart_mut().add(&product)?;
    ctx.output.success(&format!("Added {} (quantity {})", product.name, quantity));
    Ok(())
}

/// Set the quantity of a line already in the cart; zero or less removes it.
/// Returns the quantity now held.
fn set_line(cart: &mut CartStore, id: &ProductId, quantity: i64) -> Result<i64> {
    if cart.cart().get(id).is_none() {
        return Err(anyhow!("{} is not in the cart", id));
    }
    cart.set_quantity(id, quantity)?;
    Ok(quantity.max(0))
}

/// Print the cart lines and totals.
pub fn show(cart: &CartStore, ctx: &Context) -> Result<()> {
    let total = cart.total_price()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": cart.lines(),
            "totalItems": cart.total_items(),
            "totalPrice": total,
        }));
        return Ok(());
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    ctx.output.table_row(&["ID", "NAME", "QTY", "PRICE", "SUBTOTAL"], &[26, 28, 5, 10, 10]);
    for line in cart.lines() {
        ctx.output.table_row(
            &[
                line.product.id.as_str(),
                &truncate(&line.product.name, 28),
                &line.quantity.to_string(),
                &line.unit_price().display(),
                &line.line_total()?.display(),
            ],
            &[26, 28, 5, 10, 10],
        );
    }
    ctx.output.kv("Items", &cart.total_items().to_string());
    ctx.output.kv("Total", &total.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_commerce::catalog::Product;
    use shop_commerce::Money;
    use shop_store::{MemoryStore, Store};

    fn cart_with_honey() -> CartStore {
        let mut cart = CartStore::open(Store::new(MemoryStore::new()));
        let honey = Product::new("p1", "Honey", Money::new(1200), 10);
        cart.add(&honey).unwrap();
        cart.add(&honey).unwrap();
        cart
    }

    #[test]
    fn test_set_line_to_current_quantity() {
        let mut cart = cart_with_honey();
        assert_eq!(set_line(&mut cart, &ProductId::new("p1"), 2).unwrap(), 2);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_set_line_changes_quantity() {
        let mut cart = cart_with_honey();
        assert_eq!(set_line(&mut cart, &ProductId::new("p1"), 5).unwrap(), 5);
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn test_set_line_zero_removes() {
        let mut cart = cart_with_honey();
        assert_eq!(set_line(&mut cart, &ProductId::new("p1"), -1).unwrap(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_line_unknown_product() {
        let mut cart = cart_with_honey();
        let err = set_line(&mut cart, &ProductId::new("zzz"), 3).unwrap_err();
        assert_eq!(err.to_string(), "zzz is not in the cart");
        assert_eq!(cart.total_items(), 2);
    }
}
