use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::domain::{LineRequest, Order, OrderLine, OrderStatus};
use crate::error::OrderError;

use super::Catalog;

/// In-memory order ledger.
///
/// Order creation and cancellation take the catalog by `&mut` so stock reads,
/// validation and writes all happen inside one exclusive borrow.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    orders: HashMap<String, Order>,
    last_seq: u64,
}

/// Combined demand for one product across all lines of a request.
struct Demand {
    available: u32,
    requested: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, order_id: &str) -> Result<Order, OrderError> {
        self.orders
            .get(order_id)
            .cloned()
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))
    }

    /// Validates the request against the catalog and, only if every line
    /// passes, deducts stock and records a new pending order.
    ///
    /// A failed call leaves both the catalog and the ledger untouched and does
    /// not consume an order id.
    pub fn create_order(
        &mut self,
        catalog: &mut Catalog,
        customer_id: &str,
        lines: &[LineRequest],
        now: DateTime<Utc>,
    ) -> Result<Order, OrderError> {
        if customer_id.trim().is_empty() {
            return Err(OrderError::InvalidArgument("customer_id is required".to_string()));
        }
        if lines.is_empty() {
            return Err(OrderError::InvalidArgument(
                "at least one item is required".to_string(),
            ));
        }

        // Resolve every line and capture prices and stock.
        let mut priced: Vec<(&LineRequest, Decimal)> = Vec::with_capacity(lines.len());
        let mut demand: BTreeMap<&str, Demand> = BTreeMap::new();
        for line in lines {
            if line.product_id.is_empty() {
                return Err(OrderError::InvalidArgument(
                    "product_id is required for all items".to_string(),
                ));
            }
            if line.quantity <= 0 {
                return Err(OrderError::InvalidQuantity {
                    product_id: line.product_id.clone(),
                    quantity: line.quantity,
                });
            }
            let product = catalog.get(&line.product_id)?;
            let entry = demand.entry(line.product_id.as_str()).or_insert(Demand {
                available: product.stock,
                requested: 0,
            });
            entry.requested = entry.requested.saturating_add(line.quantity.unsigned_abs());
            priced.push((line, product.price));
        }

        for (product_id, d) in &demand {
            if d.requested > u64::from(d.available) {
                warn!(
                    product_id = %product_id,
                    available = d.available,
                    requested = d.requested,
                    "Rejecting order: insufficient stock"
                );
                return Err(OrderError::InsufficientStock {
                    product_id: product_id.to_string(),
                    available: d.available,
                    requested: d.requested,
                });
            }
        }

        // Each line is now bounded by a `u32` stock level, so the cast is lossless.
        let items: Vec<OrderLine> = priced
            .into_iter()
            .map(|(line, price)| OrderLine {
                product_id: line.product_id.clone(),
                quantity: line.quantity as u32,
                price,
            })
            .collect();
        let total: Decimal = items.iter().map(OrderLine::line_total).sum();

        // Every line passed; nothing below can fail for lack of stock.
        for item in &items {
            let remaining = catalog.adjust_stock(&item.product_id, -i64::from(item.quantity))?;
            debug!(product_id = %item.product_id, remaining, "Stock deducted");
        }

        self.last_seq += 1;
        let order = Order {
            id: format!("order_{}", self.last_seq),
            customer_id: customer_id.to_string(),
            items,
            status: OrderStatus::Pending,
            total,
            created_at: now,
        };
        self.orders.insert(order.id.clone(), order.clone());

        info!(order_id = %order.id, total = %order.total, lines = order.items.len(), "Order created");
        Ok(order)
    }

    /// Moves a pending order to cancelled and returns its stock to the catalog.
    ///
    /// All or nothing: if any product cannot take its stock back, the order
    /// stays pending and no stock moves.
    pub fn cancel_order(&mut self, catalog: &mut Catalog, order_id: &str) -> Result<Order, OrderError> {
        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        if !order.status.can_transition_to(OrderStatus::Cancelled) {
            warn!(order_id, status = %order.status, "Rejecting cancellation");
            return Err(OrderError::NotCancellable {
                order_id: order_id.to_string(),
                status: order.status,
            });
        }

        // Check every restoration before applying any.
        let mut restore: BTreeMap<&str, i64> = BTreeMap::new();
        for item in &order.items {
            *restore.entry(item.product_id.as_str()).or_default() += i64::from(item.quantity);
        }
        for (product_id, qty) in &restore {
            if let Err(e) = catalog.checked_stock(product_id, *qty) {
                warn!(order_id, product_id = %product_id, error = %e, "Rejecting cancellation");
                return Err(e.into());
            }
        }

        for (product_id, qty) in restore {
            let restored = catalog.adjust_stock(product_id, qty)?;
            debug!(product_id = %product_id, restored, "Stock restored");
        }
        order.status = OrderStatus::Cancelled;

        info!(order_id, "Order cancelled");
        Ok(order.clone())
    }
}
