use store_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Set up environment (dotenv, logging)
    setup_environment().map_err(|e| anyhow::anyhow!("environment setup failed: {e}"))?;

    print_banner();

    tracing::info!("Hemline store server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize server state (database, services)
    let state = ServerState::initialize(&config).await?;

    // 4. Run the HTTP server (blocks until shutdown)
    let server = Server::with_state(config, state);
    server.run().await?;

    Ok(())
}
