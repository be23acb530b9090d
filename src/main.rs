use candy_store::config::StoreConfig;
use candy_store::console::Console;
use candy_store::lifecycle::{setup_tracing, StoreSystem};
use candy_store::observer::LowStockAlert;
use tokio::io::BufReader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenv::dotenv().ok();
    setup_tracing();

    let config = StoreConfig::from_env();
    info!(?config, "Starting candy store");

    let system = StoreSystem::start(config)
        .await
        .map_err(|e| e.to_string())?;
    system.on_low_stock(|alert: &LowStockAlert| {
        println!(
            "[stock] {} is down to {} ({})",
            alert.name, alert.quantity, alert.status
        );
    });

    let customer = system.config.console_user.clone();
    let mut stdout = std::io::stdout();
    let session = Console::new(&system, customer)
        .run(BufReader::new(tokio::io::stdin()), &mut stdout)
        .await;
    if let Err(e) = session {
        error!(error = %e, "Console failed");
    }

    system.shutdown().await.map_err(|e| e.to_string())?;
    info!("Store closed");
    Ok(())
}
