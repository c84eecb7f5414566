//! Order history.

use anyhow::Result;
use shop_commerce::checkout::Order;

use crate::context::Context;
use crate::output::status_badge;

/// Run the orders command.
pub fn run(ctx: &Context) -> Result<()> {
    let app = ctx.storefront()?;
    let mut history = app.orders();

    let spinner = ctx.output.spinner("Loading orders...");
    let result = history.refresh().map(|orders| orders.to_vec());
    spinner.finish_and_clear();
    let orders = result?;

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("My orders");
    if orders.is_empty() {
        ctx.output.info("You have no orders yet.");
        return Ok(());
    }

    for order in &orders {
        print_order(order, ctx)?;
    }
    Ok(())
}

fn print_order(order: &Order, ctx: &Context) -> Result<()> {
    ctx.output.header(&format!("Order #{}", order.id.short_ref()));
    if let Some(placed) = order.placed_on() {
        ctx.output.kv("Placed", &placed);
    }
    ctx.output.kv(
        "Status",
        &status_badge(order.order_status.display_name(), order.order_status.tone()),
    );
    ctx.output.kv("Payment", order.payment_method_label());
    if let Some(address) = &order.shipping_address {
        ctx.output.kv("Ship to", &address.one_line());
    }
    for item in &order.order_items {
        ctx.output.list_item(&format!(
            "{} x{}  {}",
            item.display_name(),
            item.quantity,
            item.line_total()?
        ));
    }
    ctx.output.kv(
        "Total",
        &format!("{} ({} item(s))", order.total_price, order.item_count()),
    );
    Ok(())
}
