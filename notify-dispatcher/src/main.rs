use notify_dispatcher::config::{DispatcherConfig, load_app_config};
use notify_dispatcher::error::Result;
use notify_dispatcher::server::DispatcherServer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let app_config = load_app_config(None);
    let config = DispatcherConfig::from_app_config(&app_config);

    let server = DispatcherServer::new(config, None, None).await?;

    info!("Starting Notify Dispatcher");

    server.run().await
}
