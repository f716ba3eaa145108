use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::clients::StoreClient;
use crate::domain::{LineRequest, Order, Product};
use crate::messages::{ServiceResponse, StoreRequest};
use crate::store::OrderStore;

/// Actor that exclusively owns the [`OrderStore`].
///
/// Requests are handled one at a time in mailbox order, and no handler awaits,
/// so each transaction's reads, validation and writes complete before the
/// next request is looked at.
pub struct StoreService {
    receiver: mpsc::Receiver<StoreRequest>,
    store: OrderStore,
}

impl StoreService {
    pub fn new(buffer_size: usize, store: OrderStore) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, store };
        (service, StoreClient::new(sender))
    }

    #[instrument(name = "store_service", skip(self))]
    pub async fn run(mut self) {
        info!("StoreService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::UpsertProduct { product, respond_to } => {
                    self.handle_upsert_product(product, respond_to);
                }
                StoreRequest::GetProduct { id, respond_to } => {
                    self.handle_get_product(id, respond_to);
                }
                StoreRequest::ListProducts { respond_to } => {
                    self.handle_list_products(respond_to);
                }
                StoreRequest::CreateOrder {
                    customer_id,
                    items,
                    respond_to,
                } => {
                    self.handle_create_order(customer_id, items, respond_to);
                }
                StoreRequest::GetOrder { id, respond_to } => {
                    self.handle_get_order(id, respond_to);
                }
                StoreRequest::CancelOrder { id, respond_to } => {
                    self.handle_cancel_order(id, respond_to);
                }
                StoreRequest::Shutdown => {
                    info!("StoreService shutting down");
                    break;
                }
            }
        }

        info!("StoreService stopped");
    }

    #[instrument(fields(product_id = %product.id), skip(self, product, respond_to))]
    fn handle_upsert_product(&mut self, product: Product, respond_to: ServiceResponse<()>) {
        debug!("Processing upsert_product request");
        self.store.upsert_product(product);
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_get_product(&self, id: String, respond_to: ServiceResponse<Product>) {
        debug!("Processing get_product request");
        let _ = respond_to.send(self.store.get_product(&id));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list_products(&self, respond_to: ServiceResponse<Vec<Product>>) {
        let products = self.store.list_products();
        debug!(count = products.len(), "Processing list_products request");
        let _ = respond_to.send(Ok(products));
    }

    #[instrument(
        fields(customer_id = %customer_id, lines = items.len()),
        skip(self, customer_id, items, respond_to)
    )]
    fn handle_create_order(
        &mut self,
        customer_id: String,
        items: Vec<LineRequest>,
        respond_to: ServiceResponse<Order>,
    ) {
        info!("Processing create_order request");
        let result = self.store.create_order(&customer_id, &items);
        if let Err(e) = &result {
            warn!(error = %e, "Order rejected");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(order_id = %id), skip(self, respond_to))]
    fn handle_get_order(&self, id: String, respond_to: ServiceResponse<Order>) {
        debug!("Processing get_order request");
        let result = self.store.get_order(&id);
        match &result {
            Ok(order) => debug!(status = %order.status, total = %order.total, "Order found"),
            Err(_) => debug!("Order not found"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(order_id = %id), skip(self, respond_to))]
    fn handle_cancel_order(&mut self, id: String, respond_to: ServiceResponse<Order>) {
        info!("Processing cancel_order request");
        let result = self.store.cancel_order(&id);
        if let Err(e) = &result {
            warn!(error = %e, "Cancellation rejected");
        }
        let _ = respond_to.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderStatus;
    use crate::error::OrderError;
    use crate::store::Catalog;
    use rust_decimal::Decimal;
    use std::collections::HashSet;

    fn start(stock: u32) -> (StoreClient, tokio::task::JoinHandle<()>) {
        let catalog: Catalog = [Product::new("p1", "Laptop", Decimal::new(1000, 2), stock)]
            .into_iter()
            .collect();
        let (service, client) = StoreService::new(64, OrderStore::new(catalog));
        (client, tokio::spawn(service.run()))
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_orders_never_oversell() {
        let (client, handle) = start(5);

        let tasks: Vec<_> = (0..2)
            .map(|i| {
                let client = client.clone();
                tokio::spawn(async move {
                    client
                        .create_order(format!("c{i}"), vec![LineRequest::new("p1", 3)])
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        let mut rejections = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => successes += 1,
                Err(OrderError::InsufficientStock { available: 2, requested: 3, .. }) => rejections += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!((successes, rejections), (1, 1));
        assert_eq!(client.get_product("p1".to_string()).await.unwrap().stock, 2);

        client.shutdown().await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_single_units_exhaust_stock_exactly() {
        let (client, handle) = start(25);

        let tasks: Vec<_> = (0..40)
            .map(|i| {
                let client = client.clone();
                tokio::spawn(async move {
                    client
                        .create_order(format!("c{i}"), vec![LineRequest::new("p1", 1)])
                        .await
                })
            })
            .collect();

        let mut ids = HashSet::new();
        let mut rejections = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(order) => assert!(ids.insert(order.id), "duplicate order id"),
                Err(OrderError::InsufficientStock { .. }) => rejections += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(ids.len(), 25);
        assert_eq!(rejections, 15);
        assert_eq!(client.get_product("p1".to_string()).await.unwrap().stock, 0);

        client.shutdown().await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_and_cancels_conserve_stock() {
        let (client, handle) = start(10);

        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let client = client.clone();
                tokio::spawn(async move {
                    let order = client
                        .create_order(format!("c{i}"), vec![LineRequest::new("p1", 2)])
                        .await?;
                    if i % 2 == 0 {
                        client.cancel_order(order.id.clone()).await?;
                    }
                    Ok::<_, OrderError>(order.id)
                })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            if let Ok(id) = task.await.unwrap() {
                ids.push(id);
            }
        }

        let mut reserved = 0u32;
        for id in &ids {
            let order = client.get_order(id.clone()).await.unwrap();
            if order.status == OrderStatus::Pending {
                reserved += order.items[0].quantity;
            }
        }
        let stock = client.get_product("p1".to_string()).await.unwrap().stock;
        assert_eq!(stock + reserved, 10);

        client.shutdown().await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn list_products_sees_stock_after_an_order() {
        let (client, handle) = start(4);
        client
            .create_order("c1".to_string(), vec![LineRequest::new("p1", 3)])
            .await
            .unwrap();

        let products = client.list_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "p1");
        assert_eq!(products[0].stock, 1);

        client.shutdown().await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn dropping_every_client_stops_the_actor() {
        let (client, handle) = start(1);
        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn requests_after_shutdown_fail_with_communication_error() {
        let (client, handle) = start(1);
        client.shutdown().await.unwrap();
        handle.await.unwrap();

        let err = client.get_order("order_1".to_string()).await.unwrap_err();
        assert!(matches!(err, OrderError::ActorCommunicationError(_)));
    }
}
