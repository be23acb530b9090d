use actor_framework::ActorClient;
use candy_store::account_actor::AccountError;
use candy_store::candy_actor::InventoryError;
use candy_store::cart::ShoppingCart;
use candy_store::config::StoreConfig;
use candy_store::console::Console;
use candy_store::factory::{factory_for, CandyFactory};
use candy_store::lifecycle::StoreSystem;
use candy_store::model::{
    AccountUpdate, CandyCreate, CandyId, CandyKind, CandyPackage, CandyUpdate, NewAccount,
    OrderCreate, OrderItem, OrderStatus, PackageKind, Role, StockStatus,
};
use candy_store::observer::LowStockAlert;
use candy_store::order_actor::OrderError;
use candy_store::pricing::PercentOff;
use candy_store::repository::{DataDir, InventoryRepository};
use candy_store::service::{DashboardStats, OrderSummary};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// Seeded catalog: Gummy Bear x15, Chocolate Bar x20, Lollipop x10
const GUMMY: CandyId = CandyId(1);
const CHOCOLATE: CandyId = CandyId(2);
const LOLLIPOP: CandyId = CandyId(3);

async fn start(dir: &TempDir) -> StoreSystem {
    StoreSystem::start(StoreConfig::for_data_dir(dir.path()))
        .await
        .unwrap()
}

fn gummies(quantity: u32) -> OrderCreate {
    OrderCreate {
        customer: "customer".into(),
        items: vec![OrderItem::new(GUMMY, "Gummy Bear", quantity, 1.00)],
    }
}

/// Full system: seeded store, login, cart, checkout.
#[tokio::test]
async fn test_full_checkout_flow() {
    let dir = TempDir::new().unwrap();
    let system = start(&dir).await;

    let catalog = system.inventory.list().await.unwrap();
    let names: Vec<&str> = catalog.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Gummy Bear", "Chocolate Bar", "Lollipop"]);

    let user = system
        .accounts
        .authenticate("customer", "customer123")
        .await
        .unwrap()
        .expect("seeded customer can log in");
    assert_eq!(user.role, Role::Customer);
    assert_eq!(
        system.accounts.authenticate("customer", "wrong").await,
        Ok(None)
    );

    let mut cart = ShoppingCart::new();
    let bar = system.inventory.get(CHOCOLATE).await.unwrap().unwrap();
    let bear = system.inventory.get(GUMMY).await.unwrap().unwrap();
    cart.add_item(bar, None, 2).unwrap();
    cart.add_item(bear, Some(CandyPackage::new(PackageKind::GummyBag)), 3)
        .unwrap();
    // 2 * 1.50 + 3 * (1.00 + 2.00)
    assert_eq!(cart.total(), 12.0);

    let order = system
        .checkout
        .checkout(&user.username, &mut cart, vec![Box::new(PercentOff(0.25))])
        .await
        .unwrap();

    assert!(cart.is_empty());
    assert_eq!(order.status, OrderStatus::Paid);
    assert_eq!(order.subtotal, 12.0);
    assert_eq!(order.grand_total(), 9.0);
    assert_eq!(order.items[1].name, "Gummy Bear (Gummy Bag)");
    assert_eq!(system.inventory.check_stock(CHOCOLATE).await, Ok(18));
    assert_eq!(system.inventory.check_stock(GUMMY).await, Ok(12));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_low_stock_alerts_reach_observers() {
    let dir = TempDir::new().unwrap();
    let system = start(&dir).await;

    let alerts: Arc<Mutex<Vec<LowStockAlert>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = alerts.clone();
    system.on_low_stock(move |alert: &LowStockAlert| sink.lock().unwrap().push(alert.clone()));

    // 20 -> 15, still above the threshold of 10
    system.inventory.reserve_stock(CHOCOLATE, 5).await.unwrap();
    assert!(alerts.lock().unwrap().is_empty());

    // 10 -> 7
    let order = OrderCreate {
        customer: "customer".into(),
        items: vec![OrderItem::new(LOLLIPOP, "Lollipop", 3, 0.75)],
    };
    system.orders.create_order(order).await.unwrap();
    system.inventory.set_stock(GUMMY, 0).await.unwrap();

    {
        let alerts = alerts.lock().unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].candy_id, LOLLIPOP);
        assert_eq!(alerts[0].quantity, 7);
        assert_eq!(alerts[0].status, StockStatus::Low);
        assert_eq!(alerts[1].status, StockStatus::OutOfStock);
    }

    let low: Vec<CandyId> = system
        .inventory
        .low_stock_items()
        .await
        .unwrap()
        .iter()
        .map(|item| item.candy.id)
        .collect();
    assert_eq!(low, vec![GUMMY, LOLLIPOP]);

    // Raising the threshold applies immediately.
    system.inventory.set_low_stock_threshold(20);
    assert_eq!(system.inventory.low_stock_items().await.unwrap().len(), 3);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_orders_never_oversell() {
    let dir = TempDir::new().unwrap();
    let system = start(&dir).await;
    system.inventory.set_stock(GUMMY, 10).await.unwrap();

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let orders = system.orders.clone();
            tokio::spawn(async move { orders.create_order(gummies(1)).await })
        })
        .collect();

    let mut placed = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => placed += 1,
            Err(OrderError::Inventory(InventoryError::InsufficientStock { available, .. })) => {
                assert_eq!(available, 0)
            }
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }
    assert_eq!(placed, 10);
    assert_eq!(system.inventory.check_stock(GUMMY).await, Ok(0));
    assert_eq!(system.orders.list().await.unwrap().len(), 10);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cancel_releases_stock_and_bad_orders_hold_none() {
    let dir = TempDir::new().unwrap();
    let system = start(&dir).await;

    let id = system.orders.create_order(gummies(5)).await.unwrap();
    assert_eq!(system.inventory.check_stock(GUMMY).await, Ok(10));

    system
        .orders
        .advance_status(id, OrderStatus::Paid)
        .await
        .unwrap();
    system.orders.cancel_order(id).await.unwrap();
    assert_eq!(system.inventory.check_stock(GUMMY).await, Ok(15));

    // Second line fails, first line's reservation is handed back.
    let greedy = OrderCreate {
        customer: "customer".into(),
        items: vec![
            OrderItem::new(GUMMY, "Gummy Bear", 4, 1.00),
            OrderItem::new(LOLLIPOP, "Lollipop", 50, 0.75),
        ],
    };
    assert!(matches!(
        system.orders.create_order(greedy).await,
        Err(OrderError::Inventory(InventoryError::InsufficientStock { .. }))
    ));
    assert_eq!(system.inventory.check_stock(GUMMY).await, Ok(15));
    assert_eq!(system.inventory.check_stock(LOLLIPOP).await, Ok(10));

    let stranger = OrderCreate {
        customer: "mallory".into(),
        items: vec![OrderItem::new(GUMMY, "Gummy Bear", 1, 1.00)],
    };
    assert_eq!(
        system.orders.create_order(stranger).await,
        Err(OrderError::UnknownCustomer("mallory".into()))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_state_survives_restart() {
    let dir = TempDir::new().unwrap();

    let system = start(&dir).await;
    system
        .accounts
        .create_account(
            NewAccount::new("alice", "wonderland", Role::Customer)
                .with_email("alice@example.com")
                .with_recovery("First pet?", "Dinah"),
        )
        .await
        .unwrap();
    let sour = system
        .inventory
        .create_candy(factory_for(CandyKind::Gummy).create_candy(
            "Sour Worm",
            0.50,
            40,
        ))
        .await
        .unwrap();
    assert_eq!(sour, CandyId(4));
    let first = system.orders.create_order(gummies(2)).await.unwrap();
    system
        .orders
        .advance_status(first, OrderStatus::Paid)
        .await
        .unwrap();
    system.shutdown().await.unwrap();

    let system = start(&dir).await;
    assert_eq!(system.inventory.list().await.unwrap().len(), 4);
    assert_eq!(system.accounts.list().await.unwrap().len(), 3);
    assert_eq!(system.inventory.check_stock(GUMMY).await, Ok(13));

    let reloaded = system.orders.reload(first).await.unwrap();
    assert_eq!(reloaded.status, OrderStatus::Paid);
    assert_eq!(reloaded.items, vec![OrderItem::new(GUMMY, "Gummy Bear", 2, 1.00)]);

    // Ids continue after the loaded ones.
    let second = system.orders.create_order(gummies(1)).await.unwrap();
    assert_eq!(second.0, first.0 + 1);

    assert!(system
        .accounts
        .authenticate("alice", "wonderland")
        .await
        .unwrap()
        .is_some());
    assert_eq!(
        system.accounts.verify_recovery_answer("alice", " dinah ").await,
        Ok(true)
    );

    let stats = DashboardStats::collect(&system.inventory, &system.orders, &system.accounts)
        .await
        .unwrap();
    assert_eq!(stats.todays_orders, 2);
    assert_eq!(stats.account_count, 3);
    assert_eq!(stats.low_stock_count, 1);
    // 12 * 1.00 + 20 * 1.50 + 10 * 0.75 + 40 * 0.50
    assert_eq!(stats.total_inventory_value, 69.5);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_console_session() {
    let dir = TempDir::new().unwrap();
    let system = start(&dir).await;

    let input = b"help\ncatalog\nadd 2 3\nadd 9\nfly away\ncart\ncheckout 10\norders\nquit\ncart\n";
    let mut out = Vec::new();
    let mut console = Console::new(&system, "customer");
    console.run(&input[..], &mut out).await.unwrap();
    assert!(console.cart().is_empty());

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Chocolate Bar"));
    assert!(text.contains("Added Chocolate Bar x3."));
    assert!(text.contains("error: no candy with id candy_9"));
    assert!(text.contains("error: unknown command 'fly'"));
    assert!(text.contains("Total: $4.50"));
    assert!(text.contains("Order order_1 placed: 3 item(s), total $4.05 (Processing)."));
    assert!(text.contains("Chocolate Bar x3"));
    assert!(text.ends_with("Goodbye!\n"));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cancel_after_candy_removed_returns_stock_once() {
    let dir = TempDir::new().unwrap();
    let system = start(&dir).await;

    let order = OrderCreate {
        customer: "customer".into(),
        items: vec![
            OrderItem::new(GUMMY, "Gummy Bear", 5, 1.00),
            OrderItem::new(LOLLIPOP, "Lollipop", 2, 0.75),
        ],
    };
    let id = system.orders.create_order(order).await.unwrap();
    assert_eq!(system.inventory.check_stock(GUMMY).await, Ok(10));
    system.inventory.delete(LOLLIPOP).await.unwrap();

    assert_eq!(
        system.orders.cancel_order(id).await,
        Ok(OrderStatus::Cancelled)
    );
    for _ in 0..2 {
        assert!(matches!(
            system.orders.cancel_order(id).await,
            Err(OrderError::InvalidTransition { .. })
        ));
    }
    assert_eq!(system.inventory.check_stock(GUMMY).await, Ok(15));
    assert_eq!(
        system.orders.reload(id).await.unwrap().status,
        OrderStatus::Cancelled
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_inventory_rules() {
    let dir = TempDir::new().unwrap();
    let system = start(&dir).await;

    let alerts: Arc<Mutex<Vec<LowStockAlert>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = alerts.clone();
    system.on_low_stock(move |alert: &LowStockAlert| sink.lock().unwrap().push(alert.clone()));

    let candy = |name: &str, price: f64| CandyCreate {
        name: name.into(),
        kind: CandyKind::Gummy,
        price,
        weight: 0.05,
        quantity: 5,
    };
    for params in [candy("   ", 1.0), candy("Sour Worm", -0.5), candy("Sour Worm", f64::NAN)] {
        assert!(matches!(
            system.inventory.create_candy(params).await,
            Err(InventoryError::Validation(_))
        ));
    }
    assert_eq!(system.inventory.list().await.unwrap().len(), 3);

    assert_eq!(
        system.inventory.reserve_stock(GUMMY, 0).await,
        Err(InventoryError::InvalidQuantity(0))
    );
    assert_eq!(system.inventory.check_stock(GUMMY).await, Ok(15));

    // Decrement never goes below zero.
    assert_eq!(system.inventory.decrement(GUMMY, 100).await, Ok(0));

    let bar = system
        .inventory
        .update_candy(
            CHOCOLATE,
            CandyUpdate {
                quantity: Some(4),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(bar.quantity, 4);
    assert!(matches!(
        system
            .inventory
            .update_candy(
                CHOCOLATE,
                CandyUpdate {
                    price: Some(-1.0),
                    ..Default::default()
                },
            )
            .await,
        Err(InventoryError::Validation(_))
    ));

    {
        let alerts = alerts.lock().unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!((alerts[0].candy_id, alerts[0].status), (GUMMY, StockStatus::OutOfStock));
        assert_eq!((alerts[1].candy_id, alerts[1].status), (CHOCOLATE, StockStatus::Critical));
        assert_eq!(alerts[1].quantity, 4);
    }

    system.inventory.delete(LOLLIPOP).await.unwrap();
    let rows = InventoryRepository::new(&DataDir::new(dir.path()))
        .load_all()
        .unwrap();
    let stored: Vec<(CandyId, u32)> = rows.iter().map(|c| (c.id, c.quantity)).collect();
    assert_eq!(stored, vec![(GUMMY, 0), (CHOCOLATE, 4)]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_account_changes_survive_restart() {
    let dir = TempDir::new().unwrap();

    let system = start(&dir).await;
    system
        .accounts
        .update_password("customer", "gumdrops")
        .await
        .unwrap();
    assert_eq!(
        system.accounts.authenticate("customer", "customer123").await,
        Ok(None)
    );
    assert!(matches!(
        system.accounts.update_role("customer", "wizard").await,
        Err(AccountError::Validation(_))
    ));
    assert_eq!(
        system.accounts.update_role("customer", "admin").await,
        Ok(Role::Admin)
    );
    let updated = system
        .accounts
        .update_details(
            "customer",
            AccountUpdate {
                email: Some(" sweet@example.com ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.email, "sweet@example.com");
    system.shutdown().await.unwrap();

    let system = start(&dir).await;
    let user = system
        .accounts
        .authenticate("customer", "gumdrops")
        .await
        .unwrap()
        .expect("new password works after restart");
    assert!(user.is_admin());
    assert_eq!(user.email, "sweet@example.com");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_order_summaries_newest_first() {
    let dir = TempDir::new().unwrap();
    let system = start(&dir).await;
    system
        .accounts
        .create_account(
            NewAccount::new("alice", "wonderland", Role::Customer).with_email("alice@example.com"),
        )
        .await
        .unwrap();

    let first = system.orders.create_order(gummies(1)).await.unwrap();
    let second = system
        .orders
        .create_order(OrderCreate {
            customer: "alice".into(),
            items: vec![OrderItem::new(CHOCOLATE, "Chocolate Bar", 2, 1.50)],
        })
        .await
        .unwrap();

    let summaries = OrderSummary::for_all(&system.orders, &system.accounts)
        .await
        .unwrap();
    let rows: Vec<(_, &str, &str)> = summaries
        .iter()
        .map(|s| (s.id, s.customer.as_str(), s.email.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![(second, "alice", "alice@example.com"), (first, "customer", "")]
    );
    assert_eq!(summaries[0].items, "Chocolate Bar x2");
    assert_eq!(summaries[0].total, 3.0);

    // An admin's console lists every order.
    let mut out = Vec::new();
    Console::new(&system, "admin")
        .run(&b"orders\n"[..], &mut out)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    let alice_row = text.find("alice").unwrap();
    let customer_row = text.find("Gummy Bear x1").unwrap();
    assert!(alice_row < customer_row);

    system.shutdown().await.unwrap();
}
