use thiserror::Error;

use crate::domain::OrderStatus;

/// Errors raised by catalog stock adjustments.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Stock of {product_id} would underflow: available {available}, delta {delta}")]
    WouldUnderflow {
        product_id: String,
        available: u32,
        delta: i64,
    },
    #[error("Stock of {product_id} would overflow: available {available}, delta {delta}")]
    WouldOverflow {
        product_id: String,
        available: u32,
        delta: i64,
    },
}

/// Errors that can occur during store operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: String, quantity: i64 },
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        available: u32,
        requested: u64,
    },
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order {order_id} cannot be cancelled, status: {status}")]
    NotCancellable {
        order_id: String,
        status: OrderStatus,
    },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<CatalogError> for OrderError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => OrderError::ProductNotFound(id),
            CatalogError::WouldUnderflow {
                product_id,
                available,
                delta,
            } => OrderError::InsufficientStock {
                product_id,
                available,
                requested: delta.unsigned_abs(),
            },
            // A restoration can overflow after an upsert raised stock near the limit.
            other @ CatalogError::WouldOverflow { .. } => OrderError::InvalidArgument(other.to_string()),
        }
    }
}
