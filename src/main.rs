//! `shopfront` - the public barbershop page.

use anyhow::Context;
use std::sync::Arc;
use tokio::sync::mpsc;

use shopfront::api::{ShopApi, ShopClient};
use shopfront::config::Config;
use shopfront::constants::runtime;
use shopfront::site::SiteController;
use shopfront::tasks::Dispatcher;
use shopfront::{logging, page};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let dir = config.storage_dir()?;
    let log = logging::init(&dir, "site")?;
    tracing::info!(
        "{} {} public page using {}",
        config.app_name(),
        config.app_version(),
        config.base_url
    );

    let api: Arc<dyn ShopApi> = Arc::new(ShopClient::new(&config));
    let (tx, mut rx) = mpsc::channel(runtime::CHANNEL_BUFFER_SIZE);
    let dispatcher = Dispatcher::new(api, tx);

    let mut site = SiteController::new(&config);
    page::run(&mut site, &dispatcher, &mut rx)
        .await
        .with_context(|| format!("Public page failed, see {}", log.display()))?;
    Ok(())
}
