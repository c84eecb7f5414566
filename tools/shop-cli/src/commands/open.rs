//! Route resolution.

use anyhow::Result;
use serde_json::json;
use shop_app::View;

use super::OpenArgs;
use crate::context::Context;

/// Run the open command: resolve a path to a view and suggest the command
/// that shows it.
pub fn run(args: OpenArgs, ctx: &Context) -> Result<()> {
    let app = ctx.storefront()?;
    let view = app.navigate(&args.path);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "path": view.path(),
            "title": view.title(),
        }));
        return Ok(());
    }

    ctx.output.kv("View", view.title());
    ctx.output.kv("Path", view.path());
    ctx.output.info(&format!("Run `{}`", command_for(view)));
    Ok(())
}

fn command_for(view: View) -> &'static str {
    match view {
        View::Catalog => "shop products",
        View::Register => "shop register",
        View::Login => "shop login",
        View::Orders => "shop orders",
        View::Admin => "shop admin",
        View::Payment => "shop pay",
    }
}
