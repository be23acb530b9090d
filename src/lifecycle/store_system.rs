use crate::account_actor::{self, AccountContext, AccountError};
use crate::candy_actor::{self, InventoryContext, InventoryError, LowStockThreshold};
use crate::clients::{AccountClient, InventoryClient, OrderClient};
use crate::config::StoreConfig;
use crate::factory::{CandyFactory, ChocolateFactory, GummyFactory, HardCandyFactory};
use crate::model::{NewAccount, Role};
use crate::observer::{InventoryObserver, InventorySubject, ObserverId};
use crate::order_actor::{self, OrderContext};
use crate::repository::{AccountRepository, DataDir, InventoryRepository, OrderRepository, RepositoryError};
use crate::service::CheckoutService;
use actor_framework::ActorClient;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to load store data: {0}")]
    Load(#[from] RepositoryError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error("Actor task failed: {0}")]
    Task(String),
}

/// Id for the next entity after the ones loaded from disk.
fn next_id(loaded: impl Iterator<Item = u32>) -> u32 {
    loaded.max().map_or(1, |max| max.saturating_add(1))
}

/// The running store: three actors, their clients and the shared low-stock state.
///
/// # Wiring
///
/// The inventory and account actors have no actor dependencies. The order actor gets clones of
/// both clients in its [`OrderContext`], so it is spawned last.
///
/// # Example
///
/// ```ignore
/// let system = StoreSystem::start(StoreConfig::from_env()).await?;
/// system.on_low_stock(|alert: &LowStockAlert| println!("{} is low", alert.name));
/// let order = system.checkout.checkout("customer", &mut cart, Vec::new()).await?;
/// system.shutdown().await?;
/// ```
pub struct StoreSystem {
    pub inventory: InventoryClient,
    pub accounts: AccountClient,
    pub orders: OrderClient,
    pub checkout: CheckoutService,
    pub alerts: InventorySubject,
    pub threshold: LowStockThreshold,
    pub config: StoreConfig,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    /// Loads the CSV files, spawns the actors and seeds defaults when enabled.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn start(config: StoreConfig) -> Result<Self, StoreError> {
        let data_dir = DataDir::new(&config.data_dir);
        let inventory_repo = InventoryRepository::new(&data_dir);
        let account_repo = AccountRepository::new(&data_dir);
        let order_repo = OrderRepository::new(&data_dir);

        let candies = inventory_repo.load_all()?;
        let users = account_repo.load_all()?;
        let orders = order_repo.load_all()?;
        info!(
            data_dir = %data_dir.root().display(),
            candies = candies.len(),
            accounts = users.len(),
            orders = orders.len(),
            "Loaded store data"
        );

        let buffer = config.channel_buffer;
        let threshold = LowStockThreshold::new(config.low_stock_threshold);
        let alerts = InventorySubject::new();

        // 1. Create actors, seeded with what was on disk
        let (inventory_actor, inventory_client) =
            candy_actor::new(buffer, next_id(candies.iter().map(|c| c.id.0)));
        let (account_actor, account_client) = account_actor::new(buffer);
        let (order_actor, order_client) =
            order_actor::new(buffer, next_id(orders.iter().map(|o| o.id.0)));

        let inventory = InventoryClient::new(inventory_client, threshold.clone());
        let accounts = AccountClient::new(account_client, config.hasher()?);
        let orders_client = OrderClient::new(order_client);

        // 2. Start actors with injected context
        let inventory_handle = tokio::spawn(inventory_actor.with_entities(candies).run(
            InventoryContext {
                repo: inventory_repo,
                alerts: alerts.clone(),
                threshold: threshold.clone(),
            },
        ));
        let account_handle = tokio::spawn(
            account_actor
                .with_entities(users)
                .run(AccountContext { repo: account_repo }),
        );
        let order_handle = tokio::spawn(order_actor.with_entities(orders).run(OrderContext {
            accounts: accounts.clone(),
            inventory: inventory.clone(),
            repo: order_repo,
        }));

        let system = Self {
            checkout: CheckoutService::new(orders_client.clone()),
            inventory,
            accounts,
            orders: orders_client,
            alerts,
            threshold,
            config,
            handles: vec![order_handle, inventory_handle, account_handle],
        };
        if system.config.seed_defaults {
            system.seed_defaults().await?;
        }
        Ok(system)
    }

    /// Creates the stock catalog and the two default accounts, each only if its store is empty.
    async fn seed_defaults(&self) -> Result<(), StoreError> {
        if self.inventory.list().await?.is_empty() {
            let defaults = [
                GummyFactory.create_default(15),
                ChocolateFactory.create_default(20),
                HardCandyFactory.create_default(10),
            ];
            for params in defaults {
                self.inventory.create_candy(params).await?;
            }
            info!("Seeded default catalog");
        }
        if self.accounts.list().await?.is_empty() {
            self.accounts
                .create_account(NewAccount::new("admin", "admin123", Role::Admin))
                .await?;
            self.accounts
                .create_account(NewAccount::new("customer", "customer123", Role::Customer))
                .await?;
            info!("Seeded default accounts");
        }
        Ok(())
    }

    /// Registers a low-stock observer. Any `Fn(&LowStockAlert)` closure works.
    pub fn on_low_stock(&self, observer: impl InventoryObserver + 'static) -> ObserverId {
        self.alerts.attach(observer)
    }

    /// Drops every client, then waits for the actors to drain their mailboxes and exit.
    ///
    /// Clones of the clients held elsewhere keep their actor alive, so drop them first.
    pub async fn shutdown(self) -> Result<(), StoreError> {
        info!("Shutting down store...");
        drop(self.checkout);
        drop(self.orders);
        drop(self.inventory);
        drop(self.accounts);

        // The order actor goes first; it holds the other two actors' clients.
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(StoreError::Task(e.to_string()));
            }
        }
        info!("Store shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(std::iter::empty()), 1);
        assert_eq!(next_id([3, 9, 4].into_iter()), 10);
    }
}
