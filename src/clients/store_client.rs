use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::{LineRequest, Order, Product};
use crate::error::OrderError;
use crate::messages::StoreRequest;

/// Cloneable handle to the store actor. Every call is one message on the
/// actor's mailbox, so calls from many tasks are applied one at a time.
#[derive(Clone, Debug)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), OrderError> {
        debug!("Sending shutdown request");
        self.sender
            .send(StoreRequest::Shutdown)
            .await
            .map_err(|_| OrderError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(StoreClient => fn upsert_product(product: Product) -> () as StoreRequest::UpsertProduct);
client_method!(StoreClient => fn get_product(id: String) -> Product as StoreRequest::GetProduct);
client_method!(StoreClient => fn list_products() -> Vec<Product> as StoreRequest::ListProducts);
client_method!(StoreClient => fn create_order(customer_id: String, items: Vec<LineRequest>) -> Order as StoreRequest::CreateOrder);
client_method!(StoreClient => fn get_order(id: String) -> Order as StoreRequest::GetOrder);
client_method!(StoreClient => fn cancel_order(id: String) -> Order as StoreRequest::CancelOrder);
