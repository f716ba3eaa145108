use std::collections::HashMap;

use tracing::debug;

use crate::domain::Product;
use crate::error::CatalogError;

/// In-memory product catalog keyed by product id.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    products: HashMap<String, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the product, replacing any existing product with the same id.
    pub fn upsert(&mut self, product: Product) {
        debug!(product_id = %product.id, stock = product.stock, "Upserting product");
        self.products.insert(product.id.clone(), product);
    }

    pub fn get(&self, product_id: &str) -> Result<Product, CatalogError> {
        self.products
            .get(product_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(product_id.to_string()))
    }

    /// All products, sorted by id.
    pub fn list(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self.products.values().cloned().collect();
        products.sort_by(|a, b| a.id.cmp(&b.id));
        products
    }

    /// Returns the stock level `stock += delta` would produce, without
    /// applying it.
    pub fn checked_stock(&self, product_id: &str, delta: i64) -> Result<u32, CatalogError> {
        let available = self
            .products
            .get(product_id)
            .map(|p| p.stock)
            .ok_or_else(|| CatalogError::NotFound(product_id.to_string()))?;

        let next = i64::from(available).saturating_add(delta);
        if next < 0 {
            return Err(CatalogError::WouldUnderflow {
                product_id: product_id.to_string(),
                available,
                delta,
            });
        }
        u32::try_from(next).map_err(|_| CatalogError::WouldOverflow {
            product_id: product_id.to_string(),
            available,
            delta,
        })
    }

    /// Applies `stock += delta` and returns the new stock level.
    ///
    /// Must only be called from inside a ledger transaction, which already
    /// holds exclusive access to the whole store.
    pub fn adjust_stock(&mut self, product_id: &str, delta: i64) -> Result<u32, CatalogError> {
        let next = self.checked_stock(product_id, delta)?;
        if let Some(product) = self.products.get_mut(product_id) {
            product.stock = next;
        }
        Ok(next)
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for product in iter {
            catalog.upsert(product);
        }
        catalog
    }
}
