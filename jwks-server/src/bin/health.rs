//! Container health probe: requests `/health` on the configured address and
//! exits non-zero unless it answers 200.

use clap::Parser;
use jwks_server::{config::ServerConfig, router::HEALTH_PATH};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::parse();
    let url = format!("http://{}{HEALTH_PATH}", config.server.socket_addr());

    if let Err(e) = check(&url, &config).await {
        log::error!("health check failed: {e}");
        std::process::exit(1);
    }
}

async fn check(url: &str, config: &ServerConfig) -> Result<(), reqwest::Error> {
    reqwest::Client::builder()
        .timeout(config.server.http_req_timeout)
        .build()?
        .get(url)
        .send()
        .await?
        .error_for_status()?;

    Ok(())
}
