//! CLI command implementations.

pub mod account;
pub mod admin;
pub mod cart;
pub mod checkout;
pub mod open;
pub mod orders;
pub mod products;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Show only products that can be added to the cart.
    #[arg(long)]
    pub in_stock: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart lines and totals.
    Show,
    /// Add one unit of a product.
    Add {
        /// Product ID.
        id: String,
    },
    /// Remove a product line.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Set the quantity of a line (0 removes it).
    Set {
        /// Product ID.
        id: String,
        /// New quantity.
        quantity: i64,
    },
    /// Empty the cart.
    Clear,
}

/// Arguments for the pay command. Missing fields are prompted for.
#[derive(Args, Default)]
pub struct PayArgs {
    /// Name on the card.
    #[arg(long)]
    pub card_holder: Option<String>,

    /// Card number.
    #[arg(long)]
    pub card_number: Option<String>,

    /// Expiry date (MM/YY).
    #[arg(long)]
    pub expiry: Option<String>,

    /// Card security code.
    #[arg(long)]
    pub cvv: Option<String>,

    /// Billing street address.
    #[arg(long)]
    pub address: Option<String>,

    /// Billing city.
    #[arg(long)]
    pub city: Option<String>,

    /// Billing postal code.
    #[arg(long)]
    pub postal_code: Option<String>,

    /// Billing country.
    #[arg(long)]
    pub country: Option<String>,

    /// Never prompt; submit blank fields as they are.
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Account email.
    #[arg(short, long)]
    pub email: Option<String>,

    /// Account password (prompted when omitted).
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Full name.
    #[arg(long)]
    pub name: Option<String>,

    /// Account email.
    #[arg(short, long)]
    pub email: Option<String>,

    /// Account password (prompted when omitted).
    #[arg(long)]
    pub password: Option<String>,

    /// Street address.
    #[arg(long)]
    pub address: Option<String>,

    /// City.
    #[arg(long)]
    pub city: Option<String>,

    /// Postal code.
    #[arg(long)]
    pub postal_code: Option<String>,

    /// Country.
    #[arg(long)]
    pub country: Option<String>,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: Option<AdminCommand>,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// List products with stock badges.
    List,
    /// Create a product.
    Create(ProductFields),
    /// Update a product; omitted fields keep their current value.
    Update {
        /// Product ID.
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product.
    Delete {
        /// Product ID.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Product form fields.
#[derive(Args, Default)]
pub struct ProductFields {
    /// Product name.
    #[arg(long)]
    pub name: Option<String>,

    /// Description.
    #[arg(long)]
    pub description: Option<String>,

    /// Unit price.
    #[arg(long)]
    pub price: Option<String>,

    /// Category.
    #[arg(long)]
    pub category: Option<String>,

    /// Units in stock.
    #[arg(long)]
    pub stock: Option<String>,
}

/// Arguments for the open command.
#[derive(Args)]
pub struct OpenArgs {
    /// Route path, e.g. `/payment`.
    #[arg(default_value = "/")]
    pub path: String,
}
