//! Checkout and payment commands.

use anyhow::{bail, Result};
use dialoguer::{Input, Password};
use serde_json::json;
use shop_app::payment::StagedOrderLoad;
use shop_app::View;
use shop_commerce::checkout::{PaymentDetails, ShippingAddress, StagedOrder};

use super::PayArgs;
use crate::context::Context;

/// Run the checkout command: stage the cart for payment.
pub fn run_checkout(ctx: &Context) -> Result<()> {
    let app = ctx.storefront()?;
    let next = app.checkout()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "next": next.path() }));
        return Ok(());
    }

    ctx.output.success(&format!(
        "Order staged: {} item(s), {}",
        app.cart().total_items(),
        app.cart().total_price()?
    ));
    if next == View::Payment {
        ctx.output.info("Run `shop pay` to complete your purchase.");
    }
    Ok(())
}

/// Run the pay command: pay for the staged order.
pub fn run_pay(args: PayArgs, ctx: &Context) -> Result<()> {
    let mut app = ctx.storefront()?;

    match app.payment().load()? {
        StagedOrderLoad::NoOrder => bail!("No order to pay for. Run `shop checkout` first."),
        StagedOrderLoad::InvalidOrder(reason) => {
            bail!("The staged order was unreadable and has been discarded ({}). Run `shop checkout` again.", reason)
        }
        StagedOrderLoad::Ready(order) => summarize(&order, ctx),
    }

    let interactive = !args.no_input && !ctx.output.is_json();
    let details = collect_details(args, interactive)?;

    let spinner = ctx.output.spinner("Processing payment...");
    let result = app.pay(&details);
    spinner.finish_and_clear();
    let receipt = result?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "order": receipt.order,
            "next": receipt.next.path(),
        }));
        return Ok(());
    }

    match &receipt.order {
        Some(order) => ctx
            .output
            .success(&format!("Payment successful. Order #{} placed.", order.id.short_ref())),
        None => ctx.output.success("Payment successful."),
    }
    ctx.output.info("Run `shop orders` to see your order history.");
    Ok(())
}

fn summarize(order: &StagedOrder, ctx: &Context) {
    ctx.output.header("Order summary");
    for line in &order.items {
        ctx.output.list_item(&format!("{} x{}", line.product.name, line.quantity));
    }
    ctx.output.kv("Total", &order.total.display());
}

/// Merge flags with prompts for whatever was left out.
fn collect_details(args: PayArgs, interactive: bool) -> Result<PaymentDetails> {
    let field = |value: Option<String>, prompt: &str| -> Result<String> {
        match value {
            Some(value) => Ok(value),
            None if interactive => Ok(Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?),
            None => Ok(String::new()),
        }
    };

    let card_holder = field(args.card_holder, "Card holder")?;
    let card_number = field(args.card_number, "Card number")?;
    let expiry = field(args.expiry, "Expiry (MM/YY)")?;
    let cvv = match args.cvv {
        Some(cvv) => cvv,
        None if interactive => Password::new()
            .with_prompt("CVV")
            .allow_empty_password(true)
            .interact()?,
        None => String::new(),
    };

    Ok(PaymentDetails {
        card_holder,
        card_number,
        expiry,
        cvv,
        billing: ShippingAddress {
            address: field(args.address, "Billing address")?,
            city: field(args.city, "City")?,
            postal_code: field(args.postal_code, "Postal code")?,
            country: field(args.country, "Country")?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_without_prompts() {
        let args = PayArgs {
            card_holder: Some("Ada".to_string()),
            cvv: Some("123".to_string()),
            city: Some("Warsaw".to_string()),
            ..Default::default()
        };
        let details = collect_details(args, false).unwrap();
        assert_eq!(details.card_holder, "Ada");
        assert_eq!(details.billing.city, "Warsaw");
        assert!(details.card_number.is_empty());
        assert!(!details.is_complete());
    }
}
