//! Admin product console.

use crate::api::ProductsApi;
use crate::remote::{Remote, Tracked};
use crate::AppError;
use serde::Serialize;
use shop_auth::{Session, SessionReader};
use shop_commerce::catalog::Product;
use shop_commerce::{Money, ProductId};

/// The add/edit product form, as typed by the admin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub stock: String,
}

/// A validated product body for `POST`/`PUT /api/products`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: String,
    pub stock: i64,
}

impl ProductForm {
    /// Pre-fill the edit form from an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display_amount(),
            category: product.category.clone(),
            stock: product.stock.to_string(),
        }
    }

    /// Validate for creation: every field is required.
    pub fn validate_create(&self) -> Result<ProductInput, AppError> {
        let blank = [
            &self.name,
            &self.description,
            &self.price,
            &self.category,
            &self.stock,
        ]
        .iter()
        .any(|v| v.trim().is_empty());
        if blank {
            return Err(AppError::Validation("Please fill in all fields".to_string()));
        }
        self.to_input()
    }

    /// Validate for update: name, price and stock are required.
    pub fn validate_update(&self) -> Result<ProductInput, AppError> {
        let blank = [&self.name, &self.price, &self.stock]
            .iter()
            .any(|v| v.trim().is_empty());
        if blank {
            return Err(AppError::Validation(
                "Please fill in at least Name, Price, and Stock".to_string(),
            ));
        }
        self.to_input()
    }

    fn to_input(&self) -> Result<ProductInput, AppError> {
        let price = Money::parse(&self.price)
            .filter(|p| !p.is_negative())
            .ok_or_else(|| AppError::Validation(format!("Invalid price: {}", self.price.trim())))?;
        let stock = self
            .stock
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|s| *s >= 0)
            .ok_or_else(|| AppError::Validation(format!("Invalid stock: {}", self.stock.trim())))?;

        Ok(ProductInput {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            category: self.category.trim().to_string(),
            stock,
        })
    }
}

/// CRUD over the product list for administrators.
///
/// Every successful mutation re-fetches the list; the local copy is never
/// patched. A failed mutation leaves the list as it was.
#[derive(Debug)]
pub struct AdminConsole {
    api: ProductsApi,
    session: Session,
    products: Tracked<Vec<Product>>,
}

impl AdminConsole {
    /// Open the console. Requires a signed-in administrator.
    pub fn open(api: ProductsApi, sessions: &SessionReader) -> Result<Self, AppError> {
        let session = sessions.require_admin()?;
        Ok(Self {
            api,
            session,
            products: Tracked::new(),
        })
    }

    /// Re-fetch the product list.
    pub fn refresh(&mut self) -> Result<&[Product], AppError> {
        let ticket = self.products.begin();
        match self.api.list() {
            Ok(list) => {
                self.products.resolve(ticket, Ok(list));
                Ok(self.products())
            }
            Err(e) => {
                self.products.fail(ticket, e.to_string());
                Err(e)
            }
        }
    }

    /// The current list; empty until loaded.
    pub fn products(&self) -> &[Product] {
        self.products.value().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn state(&self) -> &Remote<Vec<Product>> {
        self.products.state()
    }

    /// Find a listed product.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products().iter().find(|p| &p.id == id)
    }

    /// Create a product, then refresh.
    pub fn create(&mut self, form: &ProductForm) -> Result<(), AppError> {
        let input = form.validate_create()?;
        self.api.create(&self.session.token, &input)?;
        tracing::info!(name = %input.name, "product created");
        self.refresh_after_mutation();
        Ok(())
    }

    /// Update a product, then refresh.
    pub fn update(&mut self, id: &ProductId, form: &ProductForm) -> Result<(), AppError> {
        let input = form.validate_update()?;
        self.api.update(&self.session.token, id, &input)?;
        tracing::info!(%id, "product updated");
        self.refresh_after_mutation();
        Ok(())
    }

    /// Delete a product after `confirm` approves it, then refresh.
    ///
    /// `confirm` receives the prompt naming the product. Returns whether
    /// the product was deleted.
    pub fn delete(
        &mut self,
        product: &Product,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool, AppError> {
        let prompt = delete_prompt(product);
        if !confirm(&prompt) {
            tracing::debug!(id = %product.id, "delete declined");
            return Ok(false);
        }
        self.api.delete(&self.session.token, &product.id)?;
        tracing::info!(id = %product.id, "product deleted");
        self.refresh_after_mutation();
        Ok(true)
    }

    fn refresh_after_mutation(&mut self) {
        if let Err(e) = self.refresh() {
            tracing::warn!(error = %e, "product list refresh failed");
        }
    }
}

/// The confirmation question shown before deleting.
pub fn delete_prompt(product: &Product) -> String {
    format!("Are you sure you want to delete \"{}\"?", product.name)
}
