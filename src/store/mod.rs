//! The order/inventory store: one catalog paired with one order ledger.

mod catalog;
mod ledger;

pub use catalog::Catalog;
pub use ledger::Ledger;

use chrono::Utc;

use crate::domain::{LineRequest, Order, Product};
use crate::error::OrderError;

/// Owns the catalog and ledger as a single unit.
///
/// Transactions need `&mut self`; whoever owns the store decides how callers
/// are serialized (see `StoreService`).
#[derive(Debug, Default, Clone)]
pub struct OrderStore {
    catalog: Catalog,
    ledger: Ledger,
}

impl OrderStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            ledger: Ledger::new(),
        }
    }

    pub fn upsert_product(&mut self, product: Product) {
        self.catalog.upsert(product);
    }

    pub fn get_product(&self, product_id: &str) -> Result<Product, OrderError> {
        Ok(self.catalog.get(product_id)?)
    }

    pub fn list_products(&self) -> Vec<Product> {
        self.catalog.list()
    }

    pub fn create_order(&mut self, customer_id: &str, lines: &[LineRequest]) -> Result<Order, OrderError> {
        self.ledger
            .create_order(&mut self.catalog, customer_id, lines, Utc::now())
    }

    pub fn get_order(&self, order_id: &str) -> Result<Order, OrderError> {
        self.ledger.get(order_id)
    }

    pub fn cancel_order(&mut self, order_id: &str) -> Result<Order, OrderError> {
        self.ledger.cancel_order(&mut self.catalog, order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderStatus;
    use rust_decimal::Decimal;

    fn store() -> OrderStore {
        OrderStore::new([Product::new("p1", "Laptop", Decimal::new(1000, 2), 5)].into_iter().collect())
    }

    #[test]
    fn get_unknown_product_is_product_not_found() {
        let store = store();
        assert_eq!(
            store.get_product("nope"),
            Err(OrderError::ProductNotFound("nope".to_string()))
        );
    }

    #[test]
    fn example_scenarios_in_sequence() {
        let mut store = store();

        let order = store.create_order("c1", &[LineRequest::new("p1", 3)]).unwrap();
        assert_eq!(order.total, Decimal::new(3000, 2));
        assert_eq!(store.get_product("p1").unwrap().stock, 2);

        let err = store.create_order("c1", &[LineRequest::new("p1", 10)]).unwrap_err();
        assert!(matches!(err, OrderError::InsufficientStock { available: 2, requested: 10, .. }));
        assert_eq!(store.get_product("p1").unwrap().stock, 2);

        let cancelled = store.cancel_order(&order.id).unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(cancelled.total, Decimal::new(3000, 2));
        assert_eq!(store.get_product("p1").unwrap().stock, 5);

        assert!(matches!(
            store.cancel_order(&order.id),
            Err(OrderError::NotCancellable { status: OrderStatus::Cancelled, .. })
        ));
        assert_eq!(store.get_order(&order.id).unwrap(), cancelled);
    }

    #[test]
    fn upsert_is_visible_to_next_order() {
        let mut store = store();
        store.upsert_product(Product::new("p2", "Mouse", Decimal::new(2999, 2), 1));

        let order = store.create_order("c1", &[LineRequest::new("p2", 1)]).unwrap();
        assert_eq!(order.total, Decimal::new(2999, 2));
        assert_eq!(store.list_products().len(), 2);
    }
}
