//! Navigable views.

use std::fmt;

/// The screens of the storefront, addressed by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    /// Product listing and cart.
    #[default]
    Catalog,
    Register,
    Login,
    /// Order history of the signed-in user.
    Orders,
    /// Admin product console.
    Admin,
    /// Payment form for the staged order.
    Payment,
}

impl View {
    /// Every view, in menu order.
    pub const ALL: [View; 6] = [
        View::Catalog,
        View::Register,
        View::Login,
        View::Orders,
        View::Admin,
        View::Payment,
    ];

    /// Resolve a path. Unknown paths land on the catalog.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "/register" => View::Register,
            "/login" => View::Login,
            "/orders" => View::Orders,
            "/admin" => View::Admin,
            "/payment" => View::Payment,
            _ => View::Catalog,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            View::Catalog => "/",
            View::Register => "/register",
            View::Login => "/login",
            View::Orders => "/orders",
            View::Admin => "/admin",
            View::Payment => "/payment",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Catalog => "Products",
            View::Register => "Register",
            View::Login => "Login",
            View::Orders => "My Orders",
            View::Admin => "Admin Dashboard",
            View::Payment => "Payment",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
