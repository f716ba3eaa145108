use tokio::sync::oneshot;

use crate::domain::{LineRequest, Order, Product};
use crate::error::OrderError;

/// Generic type aliases for service communication
pub type ServiceResult<T> = std::result::Result<T, OrderError>;
pub type ServiceResponse<T> = oneshot::Sender<ServiceResult<T>>;

/// Typed messages for the store actor. Each variant carries its parameters
/// and a oneshot channel for the response.
#[derive(Debug)]
pub enum StoreRequest {
    UpsertProduct {
        product: Product,
        respond_to: ServiceResponse<()>,
    },
    GetProduct {
        id: String,
        respond_to: ServiceResponse<Product>,
    },
    ListProducts {
        respond_to: ServiceResponse<Vec<Product>>,
    },
    CreateOrder {
        customer_id: String,
        items: Vec<LineRequest>,
        respond_to: ServiceResponse<Order>,
    },
    GetOrder {
        id: String,
        respond_to: ServiceResponse<Order>,
    },
    CancelOrder {
        id: String,
        respond_to: ServiceResponse<Order>,
    },
    Shutdown,
}
