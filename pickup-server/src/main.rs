use anyhow::Result;
use pickup_server::{Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<()> {
    let config = setup_environment()?;

    tracing::info!("Pickup server starting...");

    let state = ServerState::initialize(&config).await?;
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
