//! `shopfront-admin` - appointments and gallery management.

use anyhow::Context;
use std::sync::Arc;
use tokio::sync::mpsc;

use shopfront::admin::AdminController;
use shopfront::api::{ShopApi, ShopClient};
use shopfront::config::Config;
use shopfront::constants::runtime;
use shopfront::session::FileStore;
use shopfront::tasks::Dispatcher;
use shopfront::{logging, page};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let dir = config.storage_dir()?;
    let log = logging::init(&dir, "admin")?;
    tracing::info!(
        "{} {} admin page using {}",
        config.app_name(),
        config.app_version(),
        config.base_url
    );

    let store = FileStore::open(&dir).context("Failed to open local storage")?;
    tracing::debug!("Session store at {}", store.path().display());

    let api: Arc<dyn ShopApi> = Arc::new(ShopClient::new(&config));
    let (tx, mut rx) = mpsc::channel(runtime::CHANNEL_BUFFER_SIZE);
    let dispatcher = Dispatcher::new(api, tx);

    let mut admin = AdminController::new(&config, Box::new(store));
    page::run(&mut admin, &dispatcher, &mut rx)
        .await
        .with_context(|| format!("Admin page failed, see {}", log.display()))?;
    Ok(())
}
