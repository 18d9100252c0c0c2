use dotenvy::dotenv;
use tracing::error;

use linkforge::config::init_config;
use linkforge::runtime::{listen_for_shutdown, prepare_startup};
use linkforge::system::init_logging;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = init_config();

    // Guard must stay alive until exit or buffered logs are dropped.
    let _guard = init_logging(config);

    let ctx = match prepare_startup().await {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Startup failed: {:#}", e);
            std::process::exit(1);
        }
    };

    listen_for_shutdown(ctx).await;
}
