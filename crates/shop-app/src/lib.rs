//! Storefront client flows.
//!
//! [`Storefront`] is the single application state: it owns the store
//! handle, the API client, the session reader and the cart, and hands out
//! the per-view components built on them.
//!
//! - **Catalog**: product listing with ticketed refreshes
//! - **Cart**: the cart store, mirrored to the `cart` key
//! - **Checkout**: stages the cart under `pendingOrder`
//! - **Payment**: validates the staged order and creates the backend order
//! - **Admin**: product CRUD for administrators
//! - **Orders**: order history
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_app::Storefront;
//!
//! let mut app = Storefront::new(store, client);
//!
//! let mut catalog = app.catalog();
//! catalog.refresh()?;
//! app.cart_mut().add(&catalog.products()[0])?;
//!
//! let next = app.checkout()?; // View::Payment
//! let receipt = app.pay(&details)?;
//! ```

pub mod admin;
pub mod api;
pub mod cart_store;
pub mod catalog;
pub mod checkout;
mod error;
pub mod orders;
pub mod payment;
pub mod remote;
pub mod view;

pub use error::AppError;
pub use view::View;

use admin::AdminConsole;
use api::{OrdersApi, ProductsApi};
use cart_store::CartStore;
use catalog::Catalog;
use checkout::CheckoutCoordinator;
use orders::OrderHistory;
use payment::{PaymentReceipt, PaymentSubmitter, StagedOrderLoad, DEFAULT_PROCESSING_DELAY};
use shop_auth::{AuthClient, LoginRequest, RegisterRequest, Session, SessionReader};
use shop_commerce::checkout::PaymentDetails;
use shop_data::FetchClient;
use shop_store::Store;
use std::time::Duration;

/// The application state shared by every view.
#[derive(Debug)]
pub struct Storefront {
    store: Store,
    client: FetchClient,
    sessions: SessionReader,
    cart: CartStore,
    processing_delay: Duration,
}

impl Storefront {
    /// Build the state and hydrate the cart.
    pub fn new(store: Store, client: FetchClient) -> Self {
        Self {
            sessions: SessionReader::new(store.clone()),
            cart: CartStore::open(store.clone()),
            store,
            client,
            processing_delay: DEFAULT_PROCESSING_DELAY,
        }
    }

    /// Override the simulated payment processing pause.
    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay = delay;
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn sessions(&self) -> &SessionReader {
        &self.sessions
    }

    /// The current session, if valid.
    pub fn session(&self) -> Result<Option<Session>, AppError> {
        Ok(self.sessions.current()?)
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Resolve a path to a view.
    pub fn navigate(&self, path: &str) -> View {
        View::from_path(path)
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(ProductsApi::new(self.client.clone()))
    }

    pub fn orders(&self) -> OrderHistory {
        OrderHistory::new(OrdersApi::new(self.client.clone()), self.sessions.clone())
    }

    /// Open the admin console. Requires an administrator session.
    pub fn admin(&self) -> Result<AdminConsole, AppError> {
        AdminConsole::open(ProductsApi::new(self.client.clone()), &self.sessions)
    }

    pub fn auth(&self) -> AuthClient {
        AuthClient::new(self.client.clone(), self.sessions.clone())
    }

    pub fn login(&self, request: &LoginRequest) -> Result<Session, AppError> {
        Ok(self.auth().login(request)?)
    }

    pub fn register(&self, request: &RegisterRequest) -> Result<Session, AppError> {
        Ok(self.auth().register(request)?)
    }

    /// Sign out: drop token, profile and cart.
    pub fn logout(&mut self) -> Result<(), AppError> {
        self.auth().logout()?;
        self.cart.clear()?;
        Ok(())
    }

    /// Stage the cart for payment.
    pub fn checkout(&self) -> Result<View, AppError> {
        CheckoutCoordinator::new(self.store.clone(), self.sessions.clone()).checkout(&self.cart)
    }

    pub fn payment(&self) -> PaymentSubmitter {
        PaymentSubmitter::new(
            self.store.clone(),
            self.sessions.clone(),
            OrdersApi::new(self.client.clone()),
        )
        .with_processing_delay(self.processing_delay)
    }

    /// Load the staged order and pay for it.
    pub fn pay(&mut self, details: &PaymentDetails) -> Result<PaymentReceipt, AppError> {
        let payments = self.payment();
        let loaded = payments.load()?;
        if let StagedOrderLoad::InvalidOrder(reason) = &loaded {
            return Err(AppError::CorruptState(reason.clone()));
        }
        payments.submit(&loaded, details, &mut self.cart)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::admin::{AdminConsole, ProductForm};
    pub use crate::cart_store::CartStore;
    pub use crate::catalog::Catalog;
    pub use crate::payment::{PaymentReceipt, StagedOrderLoad};
    pub use crate::remote::Remote;
    pub use crate::{AppError, Storefront, View};
}
