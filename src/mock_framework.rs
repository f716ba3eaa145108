//! # Mock Framework
//!
//! Utilities for testing code that talks to the store actor without running it.
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its
//! mailbox, then helpers like [`expect_create_order`] to assert on what was
//! sent and to answer it.

use tokio::sync::mpsc;

use crate::clients::StoreClient;
use crate::domain::{LineRequest, Order};
use crate::messages::{ServiceResponse, StoreRequest};

/// Creates a client whose requests arrive on the returned receiver instead of
/// at a running `StoreService`, so a test can decide every reply.
pub fn create_mock_client(buffer_size: usize) -> (StoreClient, mpsc::Receiver<StoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Helper to verify that the next message is a CreateOrder request
pub async fn expect_create_order(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(String, Vec<LineRequest>, ServiceResponse<Order>)> {
    match receiver.recv().await {
        Some(StoreRequest::CreateOrder {
            customer_id,
            items,
            respond_to,
        }) => Some((customer_id, items, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a CancelOrder request
pub async fn expect_cancel_order(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(String, ServiceResponse<Order>)> {
    match receiver.recv().await {
        Some(StoreRequest::CancelOrder { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrderError;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let create_task = tokio::spawn(async move {
            client
                .create_order("c1".to_string(), vec![LineRequest::new("p1", 2)])
                .await
        });

        let (customer_id, items, responder) = expect_create_order(&mut receiver)
            .await
            .expect("Expected CreateOrder request");
        assert_eq!(customer_id, "c1");
        assert_eq!(items, vec![LineRequest::new("p1", 2)]);
        responder
            .send(Err(OrderError::ProductNotFound("p1".to_string())))
            .unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Err(OrderError::ProductNotFound("p1".to_string())));
    }

    #[tokio::test]
    async fn dropped_responder_is_a_communication_error() {
        let (client, mut receiver) = create_mock_client(10);

        let cancel_task = tokio::spawn(async move { client.cancel_order("order_1".to_string()).await });

        let (id, responder) = expect_cancel_order(&mut receiver)
            .await
            .expect("Expected CancelOrder request");
        assert_eq!(id, "order_1");
        drop(responder);

        let result = cancel_task.await.unwrap();
        assert!(matches!(result, Err(OrderError::ActorCommunicationError(_))));
    }
}
