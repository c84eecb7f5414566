//! Catalog listing.

use anyhow::Result;
use shop_commerce::catalog::Product;

use super::ProductsArgs;
use crate::context::Context;
use crate::output::{stock_badge, truncate};

/// Run the products command.
pub fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let app = ctx.storefront()?;
    let mut catalog = app.catalog();

    let spinner = ctx.output.spinner("Loading products...");
    let result = catalog.refresh().map(|list| list.to_vec());
    spinner.finish_and_clear();

    let products: Vec<Product> = result?
        .into_iter()
        .filter(|p| !args.in_stock || p.can_add_to_cart())
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Products");
    if products.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    ctx.output.table_row(&["ID", "NAME", "PRICE", "RATING", "STOCK"], &[26, 28, 10, 18, 5]);
    for product in &products {
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &truncate(&product.name, 28),
                &product.display_price().display(),
                &rating_cell(product),
                &stock_badge(product.stock),
            ],
            &[26, 28, 10, 18, 5],
        );
    }

    let in_cart = app.cart().total_items();
    if in_cart > 0 {
        ctx.output.info(&format!("{} item(s) in your cart. Run `shop cart` to review.", in_cart));
    }
    Ok(())
}

/// Stars plus review count, or a dash for unrated products.
fn rating_cell(product: &Product) -> String {
    match product.star_rating() {
        Some(stars) => format!("{} ({})", stars.render(), product.num_reviews),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_commerce::Money;

    #[test]
    fn test_rating_cell() {
        let mut product = Product::new("p1", "Honey", Money::new(1000), 3);
        assert_eq!(rating_cell(&product), "-");

        product.rating = Some(4.5);
        product.num_reviews = 2;
        assert_eq!(rating_cell(&product), "★★★★⯨ (2)");
    }
}
