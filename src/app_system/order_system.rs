use rust_decimal::Decimal;
use tracing::{error, info, instrument};

use crate::app_system::Config;
use crate::clients::StoreClient;
use crate::domain::Product;
use crate::error::OrderError;
use crate::store::OrderStore;
use crate::store_actor::StoreService;

/// The main application system that owns the store actor.
///
/// Responsible for starting the actor, handing out its client, and shutting
/// it down.
pub struct OrderSystem {
    pub store_client: StoreClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Start the store actor over an empty catalog.
    #[instrument(name = "order_system", skip(config))]
    pub fn new(config: &Config) -> Self {
        info!("Starting order system");

        let (store_service, store_client) =
            StoreService::new(config.channel_capacity, OrderStore::default());
        let handles = vec![tokio::spawn(store_service.run())];

        info!("Order system started successfully");
        Self {
            store_client,
            handles,
        }
    }

    /// Load products into the catalog through the store actor.
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub async fn seed(&self, products: Vec<Product>) -> Result<(), OrderError> {
        for product in products {
            self.store_client.upsert_product(product).await?;
        }
        info!("Catalog seeded");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down order system");

        if let Err(e) = self.store_client.shutdown().await {
            error!(error = %e, "Store actor already stopped");
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Order system shutdown complete");
        Ok(())
    }
}

/// Products the service starts with.
pub fn default_products() -> Vec<Product> {
    vec![
        Product::new("prod1", "Laptop", Decimal::new(99999, 2), 5),
        Product::new("prod2", "Mouse", Decimal::new(2999, 2), 10),
        Product::new("prod3", "Keyboard", Decimal::new(7999, 2), 3),
    ]
}
