//! Shop CLI - Command line storefront client.
//!
//! Commands:
//! - `shop products` - Browse the catalog
//! - `shop cart` - Show and edit the cart
//! - `shop checkout` - Stage the cart for payment
//! - `shop pay` - Pay for the staged order
//! - `shop login` / `shop register` / `shop logout` / `shop whoami` - Account
//! - `shop orders` - Order history
//! - `shop admin` - Manage products (administrators)
//! - `shop open` - Resolve a route to a view

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    AdminArgs, CartArgs, LoginArgs, OpenArgs, PayArgs, ProductsArgs, RegisterArgs,
};

/// Shop CLI - Browse, buy and manage products from the terminal
#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product catalog
    Products(ProductsArgs),

    /// Show or edit the cart
    Cart(CartArgs),

    /// Stage the cart for payment
    Checkout,

    /// Pay for the staged order
    Pay(PayArgs),

    /// Sign in
    Login(LoginArgs),

    /// Create an account
    Register(RegisterArgs),

    /// Sign out and clear the cart
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show your order history
    Orders,

    /// Manage products (administrators only)
    Admin(AdminArgs),

    /// Resolve a route path to a view
    Open(OpenArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Checkout => commands::checkout::run_checkout(&ctx),
        Commands::Pay(args) => commands::checkout::run_pay(args, &ctx),
        Commands::Login(args) => commands::account::run_login(args, &ctx),
        Commands::Register(args) => commands::account::run_register(args, &ctx),
        Commands::Logout => commands::account::run_logout(&ctx),
        Commands::Whoami => commands::account::run_whoami(&ctx),
        Commands::Orders => commands::orders::run(&ctx),
        Commands::Admin(args) => commands::admin::run(args, &ctx),
        Commands::Open(args) => commands::open::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_admin_delete() {
        let cli = Cli::try_parse_from(["shop", "--json", "admin", "delete", "p1", "--yes"]).unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Admin(AdminArgs {
                command: Some(commands::AdminCommand::Delete { yes: true, .. })
            })
        ));
    }
}
